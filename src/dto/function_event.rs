use crate::common::*;

pub const PNG_CONTENT_TYPE: &str = "image/png";

#[doc = "함수형 호출 이벤트. body 는 JSON 문자열 그대로 전달된다."]
#[derive(Debug, Clone, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct FunctionEvent {
    pub body: String,
}

#[doc = r#"
    함수형 호출 응답 envelope.

    성공 응답은 base64 인코딩된 PNG 본문과 `Content-Type: image/png` 헤더,
    `isBase64Encoded: true` 를 갖는다. 오류 응답은 `{"error": ...}` JSON
    본문만 가지며 헤더/인코딩 플래그는 직렬화에서 제외된다.
"#]
#[derive(Debug, Clone, Serialize, Getters)]
#[getset(get = "pub")]
pub struct FunctionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
    #[serde(rename = "isBase64Encoded", skip_serializing_if = "std::ops::Not::not")]
    pub is_base64_encoded: bool,
}

impl FunctionResponse {
    #[doc = "base64 PNG 본문을 담은 성공 응답"]
    pub fn png(base64_body: String) -> Self {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        headers.insert(String::from("Content-Type"), String::from(PNG_CONTENT_TYPE));

        FunctionResponse {
            status_code: 200,
            headers: Some(headers),
            body: base64_body,
            is_base64_encoded: true,
        }
    }

    #[doc = "JSON 오류 본문을 담은 응답"]
    pub fn json_error(status_code: u16, message: &str) -> Self {
        FunctionResponse {
            status_code,
            headers: None,
            body: json!({ "error": message }).to_string(),
            is_base64_encoded: false,
        }
    }
}
