use log::{error, info, warn};

use nabu_script::{Notice, NoticeKind};

/// Records every notification a script fires, in order.
///
/// Notifications are fire-and-forget: posting logs the message at a level
/// matching its severity and appends it to the record. There is no handle
/// and nothing to dismiss.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    posted: Vec<Notice>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => info!("[{}] {}", notice.title, notice.message),
            NoticeKind::Warning => warn!("[{}] {}", notice.title, notice.message),
            NoticeKind::Error => error!("[{}] {}", notice.title, notice.message),
        }
        self.posted.push(notice);
    }

    pub fn posted(&self) -> &[Notice] {
        &self.posted
    }
}
