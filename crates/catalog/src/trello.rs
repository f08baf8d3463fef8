//! Board capability: `trello/addcard`.

use engine::{ServiceBinding, TaskDescriptor};

pub const SERVICE: &str = "trello";
pub const VERSION: &str = "0.10.0";
pub const ENDPOINT_ADD_CARD: &str = "addcard";

pub fn binding() -> ServiceBinding {
    ServiceBinding::new(SERVICE, VERSION, SERVICE)
}

/// Arguments of an `addcard` call.
#[derive(Debug, Clone)]
pub struct AddCard<'a> {
    pub app_id: &'a str,
    pub token: &'a str,
    pub board_id: &'a str,
    pub list_id: &'a str,
    /// Card title.
    pub name: &'a str,
    pub description: &'a str,
    pub label_ids: &'a [String],
}

/// Build a `trello/addcard` task.
pub fn add_card_task(name: impl Into<String>, card: &AddCard<'_>) -> TaskDescriptor {
    TaskDescriptor::new(name, SERVICE, ENDPOINT_ADD_CARD)
        .arg("App", card.app_id)
        .arg("Token", card.token)
        .arg("Board", card.board_id)
        .arg("List", card.list_id)
        .arg("Name", card.name)
        .arg("Description", card.description)
        .arg("Labels", card.label_ids.to_vec())
}
