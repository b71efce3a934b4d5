//! 单次完成信号
//!
//! # 设计思路
//!
//! 远端服务（资料上传、加入小组等）采用“发起请求 → 回调一次结果”的契约。
//! `Completion<T>` 包装 `tokio::sync::oneshot::Sender`：
//! - `complete(self, value)` 按值消费，同一请求不可能回调两次
//! - 服务实现丢弃 `Completion` 而未回调时，等待方得到 `None`
//!
//! 服务实现可以在任意线程 / 执行器上回调。

use tokio::sync::oneshot;

/// 单次回调句柄，由服务实现持有。
#[derive(Debug)]
pub struct Completion<T> {
    sender: oneshot::Sender<T>,
}

/// 等待方。
#[derive(Debug)]
pub struct Pending<T> {
    receiver: oneshot::Receiver<T>,
}

impl<T> Completion<T> {
    /// 创建一对回调句柄与等待方。
    pub fn channel() -> (Self, Pending<T>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, Pending { receiver })
    }

    /// 回调结果。等待方已放弃时静默丢弃。
    pub fn complete(self, value: T) {
        if self.sender.send(value).is_err() {
            log::debug!("等待方已放弃，回调结果被丢弃");
        }
    }
}

impl<T> Pending<T> {
    /// 等待回调；服务未回调即丢弃句柄时返回 `None`。
    pub async fn wait(self) -> Option<T> {
        self.receiver.await.ok()
    }
}
