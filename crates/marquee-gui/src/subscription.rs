use std::time::Duration;

use iced::Subscription;

use crate::app::Message;

/// Ticks the notification sweep while any notice is on screen.
///
/// The sweep advances auto-dismiss and fade-out timers; 200 ms keeps the
/// 400 ms exit transition visible without a per-frame timer.
pub fn notice_sweep() -> Subscription<Message> {
    iced::time::every(Duration::from_millis(200)).map(|_| Message::Tick)
}
