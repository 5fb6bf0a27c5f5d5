use serde::{Deserialize, Serialize};

/// Per-date override of one occurrence in a recurring series. Custom fields
/// hold `HH:MM` values suitable for time-input controls; an empty string
/// means "inherit from the master event". The owning master's id is not
/// part of the form — it is recovered from the payload and tracked
/// alongside by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceEditFormState {
    pub date: String,
    pub custom_start_time: String,
    pub custom_end_time: String,
    pub custom_title: String,
    pub custom_description: String,
    pub custom_external_link: String,
    pub custom_image_url: String,
    pub custom_event_tag_id: String,
    pub is_cancelled: bool,
}

impl InstanceEditFormState {
    pub fn empty() -> Self {
        Self {
            date: String::new(),
            custom_start_time: String::new(),
            custom_end_time: String::new(),
            custom_title: String::new(),
            custom_description: String::new(),
            custom_external_link: String::new(),
            custom_image_url: String::new(),
            custom_event_tag_id: String::new(),
            is_cancelled: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInstanceRequest {
    pub date: String,
    pub custom_start_time: Option<String>,
    pub custom_end_time: Option<String>,
    pub custom_title: Option<String>,
    pub custom_description: Option<String>,
    pub custom_event_tag_id: Option<String>,
    pub custom_external_link: Option<String>,
    pub custom_image_url: Option<String>,
    pub is_cancelled: bool,
}
