use crate::common::*;

#[derive(Debug, Clone, Serialize, new)]
pub struct ChartBase64Response {
    pub base64: String,
}
