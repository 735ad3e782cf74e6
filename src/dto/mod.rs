pub mod chart_base64_request;
pub mod chart_base64_response;
pub mod chart_render_request;
pub mod function_event;
