//! Status Notifier Implementations
//!
//! StatusNotifierのチャネル実装

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::events::{StatusNotifier, UploadEvent};

/// チャネルにイベントを流す通知先
///
/// 受信側が別タスク・別スレッドで消費する。送信はブロックせず、
/// 受信側が閉じていればイベントは捨てられる。
pub struct ChannelNotifier {
    sender: UnboundedSender<UploadEvent>,
}

impl ChannelNotifier {
    pub fn new(sender: UnboundedSender<UploadEvent>) -> Self {
        Self { sender }
    }

    /// 通知先と受信側のペアを作成
    pub fn channel() -> (Self, UnboundedReceiver<UploadEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl StatusNotifier for ChannelNotifier {
    fn notify(&self, event: UploadEvent) {
        if self.sender.send(event).is_err() {
            debug!("Upload event receiver is closed; dropping event");
        }
    }
}
