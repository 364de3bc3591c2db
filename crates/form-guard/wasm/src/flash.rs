//! Server flash messages relayed as toasts

use form_guard_core::Severity;
use web_sys::Document;

use crate::notify::NotificationCenter;

/// Shows one error toast per child of the flash container, in document order.
///
/// Returns the number of messages relayed; 0 when the page has no container.
pub fn relay_flash_messages(document: &Document, container_id: &str, center: &NotificationCenter) -> u32 {
    let Some(container) = document.get_element_by_id(container_id) else {
        return 0;
    };

    let children = container.children();
    let mut relayed = 0;
    for index in 0..children.length() {
        if let Some(child) = children.item(index) {
            let message = child.text_content().unwrap_or_default();
            center.notify(&message, Severity::Error);
            relayed += 1;
        }
    }

    tracing::debug!(relayed, "flash messages relayed");
    relayed
}
