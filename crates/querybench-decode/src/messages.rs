use serde::Deserialize;
use serde_json::Value as Json;

/// One message from the client's JSON-lines stream, tagged by
/// `message_type`. Messages with unknown tags fail to deserialize and are
/// skipped by the decoder.
#[derive(Debug, Deserialize)]
#[serde(tag = "message_type")]
pub enum StreamMessage {
    #[serde(rename = "START")]
    Start { result_columns: Vec<ColumnMeta> },
    #[serde(rename = "DATA")]
    Data { data: Vec<Vec<Json>> },
    #[serde(rename = "FINISH_SUCCESSFULLY")]
    FinishSuccessfully,
    #[serde(rename = "FINISH_WITH_ERRORS")]
    FinishWithErrors,
}

#[derive(Debug, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,
}
