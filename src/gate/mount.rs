//! 挂载式门禁：每次挂载执行一次异步访问判定

use crate::{
    access::{AccessDecision, AccessPolicy},
    auth::SessionContext,
    models::AdminIdentity,
};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::{sync::watch, task::JoinHandle};

/// 门禁之后的渲染方观察到的状态
#[derive(Debug, Clone, PartialEq)]
pub enum GateStatus {
    Pending,
    Denied,
    Granted {
        identity: AdminIdentity,
        warning: Option<String>,
    },
}

impl GateStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, GateStatus::Pending)
    }
}

impl From<AccessDecision> for GateStatus {
    fn from(decision: AccessDecision) -> Self {
        match decision.into_parts() {
            Some((identity, warning)) => GateStatus::Granted { identity, warning },
            None => GateStatus::Denied,
        }
    }
}

/// 判定未完成时显示的占位内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Placeholder {
    #[default]
    Spinner,
    Custom(String),
}

/// 门禁当前渲染的内容
#[derive(Debug, Clone, PartialEq)]
pub enum GateView<T> {
    Placeholder(Placeholder),
    Redirect(String),
    Content { content: T, warning: Option<String> },
}

/// 绑定到受保护视图某一次挂载的门禁实例
///
/// 卸载或 drop 时取消判定；之后才到达的结果会被丢弃，
/// 不会写入状态通道。
pub struct Gate {
    status: watch::Receiver<GateStatus>,
    mounted: Arc<Mutex<bool>>,
    task: Option<JoinHandle<()>>,
    placeholder: Placeholder,
    sign_in_route: String,
}

impl Gate {
    /// 为 `session` 启动访问判定，必须在 Tokio 运行时内调用
    pub fn mount(
        policy: Arc<AccessPolicy>,
        session: SessionContext,
        sign_in_route: impl Into<String>,
    ) -> Self {
        let (tx, rx) = watch::channel(GateStatus::Pending);
        let mounted = Arc::new(Mutex::new(true));
        let guard = mounted.clone();

        let task = tokio::spawn(async move {
            let decision = policy.decide(&session).await;

            // 持锁直到发送完成，卸载无法穿插其间
            let still_mounted = guard.lock().unwrap_or_else(PoisonError::into_inner);
            if !*still_mounted {
                tracing::debug!(outcome = decision.outcome(), "Gate unmounted, discarding decision");
                return;
            }
            tx.send_replace(GateStatus::from(decision));
        });

        Self {
            status: rx,
            mounted,
            task: Some(task),
            placeholder: Placeholder::default(),
            sign_in_route: sign_in_route.into(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn status(&self) -> GateStatus {
        self.status.borrow().clone()
    }

    /// 状态通道的独立观察者
    pub fn subscribe(&self) -> watch::Receiver<GateStatus> {
        self.status.clone()
    }

    pub fn is_mounted(&self) -> bool {
        *self.mounted.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 等待判定结果；判定任务提前结束时返回最后看到的状态
    pub async fn settled(&mut self) -> GateStatus {
        if let Ok(status) = self.status.wait_for(|s| !s.is_pending()).await {
            return status.clone();
        }
        self.status()
    }

    /// 按当前状态渲染
    pub fn view<T>(&self, content: impl FnOnce(&AdminIdentity) -> T) -> GateView<T> {
        match &*self.status.borrow() {
            GateStatus::Pending => GateView::Placeholder(self.placeholder.clone()),
            GateStatus::Denied => GateView::Redirect(self.sign_in_route.clone()),
            GateStatus::Granted { identity, warning } => GateView::Content {
                content: content(identity),
                warning: warning.clone(),
            },
        }
    }

    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        *self.mounted.lock().unwrap_or_else(PoisonError::into_inner) = false;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Gate {
    fn drop(&mut self) {
        self.detach();
    }
}
