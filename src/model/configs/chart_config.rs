use crate::common::*;

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub background_rgb: [u8; 3],
    pub series_label: String,
    pub render_timeout_sec: u64,
}
