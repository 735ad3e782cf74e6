use crate::common::*;

use crate::model::chart::chart_spec::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Render a fully-resolved chart spec into an in-memory PNG image
        # Arguments
        * `spec` - Resolved line chart specification (data, axis bounds, annotations, text)

        # Returns
        * `Vec<u8>` - Encoded PNG bytes
    "]
    async fn render_line_chart(&self, spec: &ChartSpec) -> Result<Vec<u8>, ChartError>;
}
