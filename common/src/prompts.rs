//! プロンプト生成モジュール
//!
//! - ANALYSIS_PROMPT: 胸部X線分類の指示文
//! - analysis_response_schema: 構造化出力のスキーマ（AnalysisResponseと一致）
//! - build_analysis_request: 画像1枚分のリクエスト生成

use serde_json::json;

use crate::gemini::{Content, GeminiRequest, GenerationConfig, InlineData, Part};
use crate::types::Classification;

pub const ANALYSIS_PROMPT: &str = "You are an expert medical radiologist AI. Analyze this chest X-ray image.
Identify if the scan appears Normal, or shows signs of Bacterial Pneumonia or Viral Pneumonia.
Provide a confidence score (0-100) and a brief clinical report.

Return the result in JSON format.";

/// 構造化出力スキーマ
///
/// classification は3値のenum、3フィールドとも必須
pub fn analysis_response_schema() -> serde_json::Value {
    let classifications: Vec<&str> = Classification::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "classification": {
                "type": "STRING",
                "enum": classifications,
                "description": "The diagnosis classification"
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence percentage (0-100)"
            },
            "report": {
                "type": "STRING",
                "description": "A professional, concise radiologist report describing the findings."
            }
        },
        "required": ["classification", "confidence", "report"]
    })
}

/// 画像1枚の解析リクエストを生成（画像パート → 指示文の順）
pub fn build_analysis_request(mime_type: &str, image_base64: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_base64.to_string(),
                    },
                },
                Part::Text { text: ANALYSIS_PROMPT.to_string() },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: Some(analysis_response_schema()),
        },
    }
}
