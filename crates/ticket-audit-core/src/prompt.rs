//! Prompt construction: a fixed schema plus the rules as the system message,
//! the raw tickets as the user message.

use serde::{Deserialize, Serialize};

use crate::model::TicketBatch;

pub(crate) const SYSTEM_PREAMBLE: &str = "\
You are a meticulous ITSM validator for ServiceNow tickets.
Analyze the provided tickets against the completeness rules and return a JSON array with this exact structure:

[
  {
    \"ticket_id\": \"string (prefer sys_id, else number, else 'unknown')\",
    \"ticket_number\": \"string (prefer number field, else '')\",
    \"type\": \"string (incident/request/other)\",
    \"completeness\": boolean,
    \"missing_fields\": [\"field1\", \"field2\"],
    \"remarks\": \"string (concise guidance)\"
  }
]

Rules to apply:
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged chat message, serialized as `{"role", "content"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// The conversation sent to the endpoint: system first, then user.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: Role::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: Role::User,
                content: self.user.clone(),
            },
        ]
    }
}

pub fn build_prompt(rules: &[String], tickets: &TicketBatch) -> Prompt {
    let bullets = rules
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!("{}{}", SYSTEM_PREAMBLE, bullets);
    let user = format!(
        "Analyze these ServiceNow tickets for completeness:\n\n\
         {}\n\n\
         Return ONLY the JSON array, no other text or markdown.",
        tickets.as_str()
    );

    Prompt { system, user }
}
