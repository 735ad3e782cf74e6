use crate::common::*;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};

use crate::dto::{
    chart_base64_request::*, chart_base64_response::*, chart_render_request::*, function_event::*,
};

use crate::model::chart::chart_spec::*;
use crate::model::configs::total_config::*;

use crate::traits::service_traits::chart_service::*;

/* 원본 계약과 바이트 호환되는 응답 메시지 */
const INCOMPLETE_DATA_MSG: &str = "Dados incompletos!";
const RENDER_ERROR_MSG: &str = "Erro ao gerar gráfico";
const BASE64_RENDER_ERROR_MSG: &str = "Erro ao gerar o gráfico";

#[derive(Debug, new)]
pub struct MainController<C: ChartService> {
    chart_service: Arc<C>,
}

impl<C: ChartService + 'static> MainController<C> {
    #[doc = r#"
        HTTP 서버를 구동하는 핵심 함수.

        1. 설정 파일에서 바인딩 주소(host, port)를 읽어온다
        2. 두 개의 렌더링 엔드포인트를 라우팅:
           - `POST /grafico-base64` : 단순 차트, JSON `{ base64 }` 응답
           - `POST /grafico`        : 함수형 이벤트 어댑터의 HTTP 캐리어
        3. 요청 처리 중의 모든 오류는 핸들러 경계에서 응답 형태로 변환된다

        # Returns
        * `anyhow::Result<()>` - 정상 종료 시 Ok(()), 바인딩/서빙 실패 시 Err
    "#]
    pub async fn run_server(&self) -> anyhow::Result<()> {
        let server_config = get_server_config_info();

        let app: Router = Router::new()
            .route("/grafico-base64", post(generate_chart_base64::<C>))
            .route("/grafico", post(generate_chart_event::<C>))
            .with_state(self.chart_service.clone());

        let addr: String = format!("{}:{}", server_config.host(), server_config.port());
        info!("Chart render server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .context("[MainController->run_server] failed to bind listener")?;

        axum::serve(listener, app)
            .await
            .context("[MainController->run_server] server terminated abnormally")?;

        Ok(())
    }
}

#[doc = "단순 차트 엔드포인트: 데이터만 받아 base64 PNG 를 JSON 으로 반환"]
async fn generate_chart_base64<C: ChartService>(
    State(chart_service): State<Arc<C>>,
    Json(request): Json<ChartBase64Request>,
) -> Response {
    match render_basic_chart(chart_service.as_ref(), request).await {
        Ok(base64_image) => {
            (StatusCode::OK, Json(ChartBase64Response::new(base64_image))).into_response()
        }
        Err(e) => {
            error!("[MainController->generate_chart_base64] {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": BASE64_RENDER_ERROR_MSG })),
            )
                .into_response()
        }
    }
}

async fn render_basic_chart<C: ChartService>(
    chart_service: &C,
    request: ChartBase64Request,
) -> Result<String, ChartError> {
    let spec: ChartSpec = ChartSpec::basic(request.data_time, request.series)?;
    let png_bytes: Vec<u8> = chart_service.render_line_chart(&spec).await?;

    Ok(BASE64_STANDARD.encode(png_bytes))
}

#[doc = "함수형 이벤트 어댑터의 HTTP 캐리어: 요청 본문이 이벤트 body 가 된다"]
async fn generate_chart_event<C: ChartService>(
    State(chart_service): State<Arc<C>>,
    body: String,
) -> Response {
    let event: FunctionEvent = FunctionEvent::new(body);
    let function_response: FunctionResponse =
        handle_chart_event(chart_service.as_ref(), event).await;

    function_response_into_http(function_response)
}

#[doc = r#"
    함수형(event-driven) 호출 경로의 핵심 핸들러.

    1. 이벤트 body(JSON 문자열)를 임계값 차트 요청으로 역직렬화
    2. `ChartSpec::build` 로 검증 + y축/임계선 파생 (실패 시 400)
    3. 렌더링 후 base64 PNG 본문의 200 응답 구성 (실패 시 500)

    검증 오류의 필드 상세는 서버 로그에만 남기고, 응답 본문은
    원본 계약의 고정 메시지를 유지한다.
"#]
pub async fn handle_chart_event<C: ChartService>(
    chart_service: &C,
    event: FunctionEvent,
) -> FunctionResponse {
    let request: ChartRenderRequest = match serde_json::from_str(event.body()) {
        Ok(request) => request,
        Err(e) => {
            error!("[MainController->handle_chart_event] malformed event body: {:?}", e);
            return FunctionResponse::json_error(500, RENDER_ERROR_MSG);
        }
    };

    let spec: ChartSpec = match ChartSpec::build(request.into_spec_params()) {
        Ok(spec) => spec,
        Err(e) => {
            warn!("[MainController->handle_chart_event] {}", e);
            return FunctionResponse::json_error(400, INCOMPLETE_DATA_MSG);
        }
    };

    match chart_service.render_line_chart(&spec).await {
        Ok(png_bytes) => FunctionResponse::png(BASE64_STANDARD.encode(png_bytes)),
        Err(e) => {
            error!("[MainController->handle_chart_event] {:?}", e);
            FunctionResponse::json_error(500, RENDER_ERROR_MSG)
        }
    }
}

#[doc = "함수형 응답 envelope 를 HTTP 응답으로 펼치는 변환"]
fn function_response_into_http(function_response: FunctionResponse) -> Response {
    let status: StatusCode = StatusCode::from_u16(*function_response.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response: Response = (status, function_response.body).into_response();

    if let Some(headers) = function_response.headers {
        for (name, value) in headers {
            if name.eq_ignore_ascii_case("content-type") {
                if let Ok(header_value) = value.parse() {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, header_value);
                }
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubChartService {
        fail: bool,
    }

    #[async_trait]
    impl ChartService for StubChartService {
        async fn render_line_chart(&self, _spec: &ChartSpec) -> Result<Vec<u8>, ChartError> {
            if self.fail {
                Err(ChartError::Render(String::from("backend crashed")))
            } else {
                Ok(vec![0x89, b'P', b'N', b'G'])
            }
        }
    }

    fn full_event_body() -> String {
        json!({
            "minimoHistorico": 10.0,
            "maximoHistorico": 50.0,
            "presetMin": 8.0,
            "presetMax": 55.0,
            "dataTime": ["08:00", "09:00"],
            "series": [21.5, 23.0],
            "title": "Temperatura",
            "subTitle": "Câmara fria 01",
            "textLegend": "Temperatura (°C)"
        })
        .to_string()
    }

    #[tokio::test]
    async fn event_with_complete_fields_returns_png_envelope() {
        let service = StubChartService { fail: false };

        let response: FunctionResponse =
            handle_chart_event(&service, FunctionEvent::new(full_event_body())).await;

        assert_eq!(*response.status_code(), 200);
        assert!(*response.is_base64_encoded());
        assert_eq!(
            response.headers().as_ref().unwrap().get("Content-Type"),
            Some(&String::from(PNG_CONTENT_TYPE))
        );
        assert_eq!(response.body(), &BASE64_STANDARD.encode([0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn event_missing_required_field_returns_400() {
        let service = StubChartService { fail: false };

        let mut body: serde_json::Value = serde_json::from_str(&full_event_body()).unwrap();
        body.as_object_mut().unwrap().remove("title");

        let response: FunctionResponse =
            handle_chart_event(&service, FunctionEvent::new(body.to_string())).await;

        assert_eq!(*response.status_code(), 400);
        assert_eq!(response.body(), r#"{"error":"Dados incompletos!"}"#);
    }

    #[tokio::test]
    async fn event_with_zero_threshold_is_accepted() {
        let service = StubChartService { fail: false };

        let mut body: serde_json::Value = serde_json::from_str(&full_event_body()).unwrap();
        body["presetMin"] = json!(0.0);
        body["minimoHistorico"] = json!(0.0);

        let response: FunctionResponse =
            handle_chart_event(&service, FunctionEvent::new(body.to_string())).await;

        assert_eq!(*response.status_code(), 200);
    }

    #[tokio::test]
    async fn event_with_render_failure_returns_500() {
        let service = StubChartService { fail: true };

        let response: FunctionResponse =
            handle_chart_event(&service, FunctionEvent::new(full_event_body())).await;

        assert_eq!(*response.status_code(), 500);
        assert_eq!(response.body(), r#"{"error":"Erro ao gerar gráfico"}"#);
    }

    #[tokio::test]
    async fn event_with_malformed_body_returns_500() {
        let service = StubChartService { fail: false };

        let response: FunctionResponse =
            handle_chart_event(&service, FunctionEvent::new(String::from("not json"))).await;

        assert_eq!(*response.status_code(), 500);
    }

    #[tokio::test]
    async fn basic_chart_helper_encodes_png_as_base64() {
        let service = StubChartService { fail: false };

        let request: ChartBase64Request = serde_json::from_value(json!({
            "dataTime": ["08:00", "09:00"],
            "series": [21.5, 23.0]
        }))
        .unwrap();

        let encoded: String = render_basic_chart(&service, request).await.unwrap();
        assert_eq!(encoded, BASE64_STANDARD.encode([0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn basic_chart_helper_rejects_mismatched_lengths() {
        let service = StubChartService { fail: false };

        let request: ChartBase64Request = serde_json::from_value(json!({
            "dataTime": ["08:00", "09:00"],
            "series": [21.5]
        }))
        .unwrap();

        let err: ChartError = render_basic_chart(&service, request).await.unwrap_err();
        assert!(matches!(err, ChartError::Validation { field: "series", .. }));
    }
}
