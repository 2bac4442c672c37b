//! APIレスポンスパーサー
//!
//! Geminiのテキスト出力からJSONオブジェクトを抽出し、
//! AnalysisResponse に変換する

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{AnalysisResponse, Classification};

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use pneumoscan_common::extract_json;
///
/// let response = "Result: {\"classification\": \"Normal\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

#[derive(Deserialize)]
struct RawAnalysis {
    classification: String,
    confidence: f64,
    report: String,
}

/// 解析レスポンスをパース
///
/// - classification は3値のいずれかに完全一致すること
/// - confidence は有限値であること。範囲外は 0-100 に丸める
/// - 空のレスポンスは EmptyResponse
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResponse> {
    if response.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }

    let json_str = extract_json(response)?;
    let raw: RawAnalysis = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("Analysis JSON parse error: {}", e)))?;

    let classification: Classification = raw.classification.parse()?;

    if !raw.confidence.is_finite() {
        return Err(Error::Parse(format!("Invalid confidence: {}", raw.confidence)));
    }

    Ok(AnalysisResponse {
        classification,
        confidence: raw.confidence.clamp(0.0, 100.0),
        report: raw.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Here is the analysis:
```json
{"classification": "Normal", "confidence": 95, "report": "Clear."}
```
Some additional text."#;

        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("classification"));
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"{"classification": "Normal"}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Result: {"key": "value"} done."#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_error() {
        let result = extract_json("No JSON here, just plain text.");
        if let Err(Error::Parse(msg)) = result {
            assert!(msg.contains("not found"));
        } else {
            panic!("Expected Parse error");
        }
    }

    // =============================================
    // parse_analysis_response テスト
    // =============================================

    #[test]
    fn test_parse_analysis_response() {
        let response = r#"{
            "classification": "Bacterial Pneumonia",
            "confidence": 91.4,
            "report": "Right lower lobe consolidation."
        }"#;

        let result = parse_analysis_response(response).unwrap();
        assert_eq!(result.classification, Classification::BacterialPneumonia);
        assert_eq!(result.confidence, 91.4);
        assert_eq!(result.report, "Right lower lobe consolidation.");
    }

    #[test]
    fn test_parse_analysis_response_fenced() {
        let response = "```json\n{\"classification\": \"Viral Pneumonia\", \"confidence\": 77, \"report\": \"Interstitial pattern.\"}\n```";

        let result = parse_analysis_response(response).unwrap();
        assert_eq!(result.classification, Classification::ViralPneumonia);
        assert_eq!(result.confidence, 77.0);
    }

    #[test]
    fn test_parse_analysis_response_clamps_confidence() {
        let high = r#"{"classification": "Normal", "confidence": 140, "report": "r"}"#;
        assert_eq!(parse_analysis_response(high).unwrap().confidence, 100.0);

        let low = r#"{"classification": "Normal", "confidence": -5, "report": "r"}"#;
        assert_eq!(parse_analysis_response(low).unwrap().confidence, 0.0);
    }

    #[test]
    fn test_parse_analysis_response_unknown_classification() {
        let response = r#"{"classification": "Tuberculosis", "confidence": 80, "report": "r"}"#;
        assert!(matches!(parse_analysis_response(response), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_analysis_response_missing_field() {
        let response = r#"{"classification": "Normal", "confidence": 80}"#;
        assert!(matches!(parse_analysis_response(response), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_analysis_response_confidence_as_string() {
        let response = r#"{"classification": "Normal", "confidence": "high", "report": "r"}"#;
        assert!(parse_analysis_response(response).is_err());
    }

    #[test]
    fn test_parse_analysis_response_empty() {
        assert!(matches!(parse_analysis_response(""), Err(Error::EmptyResponse)));
        assert!(matches!(parse_analysis_response("   \n"), Err(Error::EmptyResponse)));
    }
}
