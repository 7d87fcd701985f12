//! JSON tool interface for the Maintenance Strategy Advisor
//!
//! Exposes the selector, the KPI calculator, the quiz and the reference
//! guide as JSON tools, plus a JSON-RPC 2.0 dispatcher used by the HTTP
//! endpoint.

use crate::content::{self, Topic};
use crate::error::InputError;
use crate::kpi::{self, KpiInputs};
use crate::quiz::{self, QuestionBank, QuizAttempt, QuizSession};
use crate::recommend;
use crate::types::*;
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::str::FromStr;

pub const JSONRPC_TOOL_ERROR: i64 = -32000;
pub const JSONRPC_METHOD_NOT_FOUND: i64 = -32601;

// ============================================================================
// TOOL DEFINITIONS
// ============================================================================

fn level_property(description: &str, levels: [&str; 3]) -> Value {
    json!({
        "type": "string",
        "enum": levels,
        "description": description
    })
}

fn selector_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "criticality": level_property(
                "Importance of the asset to safety, production, or legal compliance",
                ["High", "Medium", "Low"]),
            "environment": level_property(
                "Physical conditions around the asset",
                ["Harsh", "Normal", "Clean"]),
            "failure_history": level_property(
                "How often this asset fails",
                ["Frequent", "Occasional", "Rare"]),
            "maintenance_cost": level_property(
                "Cost to repair, including labor, tools, spares",
                ["High", "Medium", "Low"]),
            "downtime_cost": level_property(
                "Cost of unavailability in production, safety, or compliance",
                ["High", "Medium", "Low"])
        },
        "required": ["criticality", "environment", "failure_history", "maintenance_cost", "downtime_cost"]
    })
}

/// Tool definitions
pub fn get_tools() -> Vec<Value> {
    let number = |description: &str| json!({"type": "number", "description": description});

    vec![
        json!({
            "name": "recommend_strategy",
            "description": "Recommend a maintenance strategy (RTF, CBM, TBM, RCM or PM) from asset criticality, operating environment, failure history, maintenance cost and downtime cost. Returns the strategy, why, and typical examples.",
            "inputSchema": selector_schema()
        }),
        json!({
            "name": "explain_recommendation",
            "description": "Same inputs as recommend_strategy. Also returns every rule in priority order, whether it matched, and whether an earlier rule shadowed it.",
            "inputSchema": selector_schema()
        }),
        json!({
            "name": "calculate_kpis",
            "description": "Compute MTBF, MTTR, availability, cost per unit, schedule compliance and budget variance. Omitted inputs take the worked-example values. A metric whose denominator is zero is returned as null.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "uptime": number("Total uptime (hours)"),
                    "failures": number("Number of failures"),
                    "downtime": number("Total downtime (hours)"),
                    "repairs": number("Number of repairs"),
                    "cost": number("Total maintenance cost"),
                    "output": number("Total output (MWh, tons, ...)"),
                    "scheduled_jobs": number("Scheduled jobs"),
                    "completed_jobs": number("Jobs completed on time"),
                    "planned_budget": number("Planned maintenance budget"),
                    "actual_spend": number("Actual maintenance spend")
                }
            }
        }),
        json!({
            "name": "list_quiz_questions",
            "description": "List the 25 quiz questions with their four options (answers are not included).",
            "inputSchema": {"type": "object", "properties": {}}
        }),
        json!({
            "name": "score_quiz",
            "description": "Record quiz answers by position (letter a-d, number 1-4, or option text; null, blank or \"-\" to skip). Feedback and score are only returned when submit is true.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "answers": {
                        "type": "array",
                        "items": {"type": ["string", "integer", "null"]},
                        "description": "One entry per question, in order"
                    },
                    "submit": {
                        "type": "boolean",
                        "description": "Evaluate the answers"
                    }
                },
                "required": ["answers", "submit"]
            }
        }),
        json!({
            "name": "get_topic",
            "description": "Reference guide sections: overview, comparison, monitoring, dipf, bathtub, about.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "enum": Topic::ALL.iter().map(|t| t.id()).collect::<Vec<_>>()
                    }
                },
                "required": ["topic"]
            }
        }),
    ]
}

// ============================================================================
// TOOL DISPATCH
// ============================================================================

fn required_str<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, InputError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or(InputError::MissingFlag(key))
}

fn level_arg<T>(args: &Value, key: &'static str) -> Result<T, InputError>
where
    T: FromStr<Err = InputError>,
{
    required_str(args, key)?.parse()
}

/// Build a selector input from tool arguments
pub fn recommendation_input(args: &Value) -> Result<RecommendationInput, InputError> {
    Ok(RecommendationInput {
        criticality: level_arg(args, "criticality")?,
        environment: level_arg(args, "environment")?,
        failure_history: level_arg(args, "failure_history")?,
        maintenance_cost: level_arg(args, "maintenance_cost")?,
        downtime_cost: level_arg(args, "downtime_cost")?,
    })
}

/// Run a tool by name
pub fn handle_tool_call(name: &str, args: &Value, bank: &QuestionBank) -> Result<Value> {
    tracing::debug!(tool = name, "tool call");

    match name {
        "recommend_strategy" => {
            let input = recommendation_input(args)?;
            Ok(serde_json::to_value(recommend::recommend(&input))?)
        }
        "explain_recommendation" => {
            let input = recommendation_input(args)?;
            Ok(serde_json::to_value(recommend::explain(&input))?)
        }
        "calculate_kpis" => {
            let inputs: KpiInputs = if args.is_null() {
                KpiInputs::default()
            } else {
                serde_json::from_value(args.clone()).context("Invalid KPI arguments")?
            };
            let report = kpi::evaluate(&inputs);
            Ok(json!({
                "inputs": inputs,
                "kpis": report,
                "lines": report.lines(),
                "omitted": report.omitted(),
            }))
        }
        "list_quiz_questions" => {
            let questions: Vec<Value> = bank
                .questions()
                .iter()
                .enumerate()
                .map(|(i, q)| json!({"number": i + 1, "text": q.text, "options": q.options}))
                .collect();
            Ok(json!({"total": bank.len(), "questions": questions}))
        }
        "score_quiz" => score_quiz_tool(args, bank),
        "get_topic" => {
            let topic: Topic = required_str(args, "topic")?.parse()?;
            Ok(serde_json::to_value(content::page(topic))?)
        }
        _ => bail!("Unknown tool: {}", name),
    }
}

fn score_quiz_tool(args: &Value, bank: &QuestionBank) -> Result<Value> {
    let answers = args
        .get("answers")
        .and_then(|a| a.as_array())
        .ok_or(InputError::MissingFlag("answers"))?;
    let submit = args.get("submit").and_then(|s| s.as_bool()).unwrap_or(false);

    let entries = answers
        .iter()
        .enumerate()
        .map(|(index, value)| answer_entry(index, value))
        .collect::<Result<Vec<String>, InputError>>()?;
    let attempt = QuizAttempt::from_answers(bank, &entries)?;
    let mut session = QuizSession::with_attempt(bank, attempt);

    if submit {
        session.submit();
    }
    let feedback: Option<quiz::QuizReport> = session.feedback();

    Ok(json!({
        "submitted": session.is_submitted(),
        "answered": session.attempt().answered(),
        "feedback": feedback,
    }))
}

/// One positional answer as text. `null` becomes a skip and whole numbers
/// go through the same `1`-`4` shorthand as the CLI.
fn answer_entry(index: usize, value: &Value) -> Result<String, InputError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(InputError::UnknownOption {
            question: index + 1,
            answer: other.to_string(),
        }),
    }
}

// ============================================================================
// JSON-RPC
// ============================================================================

/// Handle one JSON-RPC 2.0 request and build the response envelope
pub fn handle_rpc(request: &Value, bank: &QuestionBank) -> Value {
    let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");
    let params = request.get("params").cloned().unwrap_or(json!({}));
    let id = request.get("id").cloned().unwrap_or(json!(1));

    let result = match method {
        "tools/list" => Ok(json!({"tools": get_tools()})),
        "tools/call" => {
            let name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(json!({}));
            handle_tool_call(name, &args, bank).map_err(|e| (JSONRPC_TOOL_ERROR, e.to_string()))
        }
        _ => Err((
            JSONRPC_METHOD_NOT_FOUND,
            format!("Unknown method: {}", method),
        )),
    };

    match result {
        Ok(r) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": r
        }),
        Err((code, message)) => {
            tracing::warn!(method, code, %message, "rpc request failed");
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": code, "message": message}
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_args() -> Value {
        json!({
            "criticality": "High",
            "environment": "harsh",
            "failure_history": "Frequent",
            "maintenance_cost": "High",
            "downtime_cost": "HIGH"
        })
    }

    #[test]
    fn test_tool_names() {
        let names: Vec<String> = get_tools()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "recommend_strategy",
                "explain_recommendation",
                "calculate_kpis",
                "list_quiz_questions",
                "score_quiz",
                "get_topic"
            ]
        );
    }

    #[test]
    fn test_recommend_tool() {
        let bank = QuestionBank::standard();
        let result = handle_tool_call("recommend_strategy", &selector_args(), &bank).unwrap();
        assert_eq!(result["strategy"], "condition-based");
        assert_eq!(result["label"], "Condition-Based Maintenance (CBM)");
    }

    #[test]
    fn test_recommend_tool_rejects_bad_level() {
        let bank = QuestionBank::standard();
        let mut args = selector_args();
        args["environment"] = json!("Underwater");
        let err = handle_tool_call("recommend_strategy", &args, &bank).unwrap_err();
        assert!(err.to_string().contains("Underwater"));

        let err = handle_tool_call("recommend_strategy", &json!({}), &bank).unwrap_err();
        assert!(err.to_string().contains("criticality"));
    }

    #[test]
    fn test_explain_tool_marks_shadowed_rcm() {
        let bank = QuestionBank::standard();
        let result = handle_tool_call("explain_recommendation", &selector_args(), &bank).unwrap();
        assert_eq!(result["winning_rule"], "condition-based");
        assert_eq!(result["trace"][3]["rule"], "reliability-centered");
        assert_eq!(result["trace"][3]["shadowed"], true);
    }

    #[test]
    fn test_kpi_tool_nulls_guarded_metrics() {
        let bank = QuestionBank::standard();
        let result =
            handle_tool_call("calculate_kpis", &json!({"failures": 0, "repairs": 0}), &bank)
                .unwrap();
        assert!(result["kpis"]["mtbf"].is_null());
        assert!(result["kpis"]["mttr"].is_null());
        assert_eq!(result["kpis"]["cost_per_unit"], 15.0);
        assert_eq!(result["omitted"], json!(["mtbf", "mttr"]));
    }

    #[test]
    fn test_quiz_tool_withholds_feedback_until_submit() {
        let bank = QuestionBank::standard();
        let answers = json!(["b", "c", null, "b"]);

        let pending =
            handle_tool_call("score_quiz", &json!({"answers": answers, "submit": false}), &bank)
                .unwrap();
        assert_eq!(pending["submitted"], false);
        assert_eq!(pending["answered"], 3);
        assert!(pending["feedback"].is_null());

        let done =
            handle_tool_call("score_quiz", &json!({"answers": answers, "submit": true}), &bank)
                .unwrap();
        assert_eq!(done["feedback"]["score"], 3);
        assert_eq!(done["feedback"]["total"], 25);
        assert!(done["feedback"]["results"][2]["selected"].is_null());
    }

    #[test]
    fn test_quiz_tool_skip_markers_and_numbers() {
        let bank = QuestionBank::standard();

        let result =
            handle_tool_call("score_quiz", &json!({"answers": [2, null], "submit": true}), &bank)
                .unwrap();
        assert_eq!(result["answered"], 1);
        assert_eq!(result["feedback"]["score"], 1);

        let result = handle_tool_call(
            "score_quiz",
            &json!({"answers": [2, "-", "", "  "], "submit": true}),
            &bank,
        )
        .unwrap();
        assert_eq!(result["answered"], 1);
        assert!(result["feedback"]["results"][1]["selected"].is_null());
    }

    #[test]
    fn test_quiz_tool_rejects_unusable_answers() {
        let bank = QuestionBank::standard();
        for answers in [json!([true]), json!([{}]), json!([["b"]]), json!([7]), json!([1.5])] {
            let result =
                handle_tool_call("score_quiz", &json!({"answers": answers, "submit": true}), &bank);
            assert!(result.is_err(), "{} accepted", answers);
        }

        let err = handle_tool_call("score_quiz", &json!({"answers": ["b", false]}), &bank)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::UnknownOption {
                question: 2,
                answer: "false".to_string()
            })
        );
    }

    #[test]
    fn test_question_list_hides_answers() {
        let bank = QuestionBank::standard();
        let result = handle_tool_call("list_quiz_questions", &json!({}), &bank).unwrap();
        assert_eq!(result["total"], 25);
        assert!(result["questions"][0].get("correct_index").is_none());
    }

    #[test]
    fn test_topic_tool() {
        let bank = QuestionBank::standard();
        let result = handle_tool_call("get_topic", &json!({"topic": "bathtub"}), &bank).unwrap();
        assert_eq!(result["topic"], "bathtub");
        assert!(handle_tool_call("get_topic", &json!({"topic": "x"}), &bank).is_err());
    }

    #[test]
    fn test_rpc_envelopes() {
        let bank = QuestionBank::standard();

        let ok = handle_rpc(
            &json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call",
                    "params": {"name": "recommend_strategy", "arguments": selector_args()}}),
            &bank,
        );
        assert_eq!(ok["id"], 7);
        assert_eq!(ok["result"]["strategy"], "condition-based");

        let unknown_tool = handle_rpc(
            &json!({"id": 8, "method": "tools/call", "params": {"name": "fly"}}),
            &bank,
        );
        assert_eq!(unknown_tool["error"]["code"], JSONRPC_TOOL_ERROR);

        let unknown_method = handle_rpc(&json!({"id": 9, "method": "ping"}), &bank);
        assert_eq!(unknown_method["error"]["code"], JSONRPC_METHOD_NOT_FOUND);

        let list = handle_rpc(&json!({"id": 10, "method": "tools/list"}), &bank);
        assert_eq!(list["result"]["tools"].as_array().unwrap().len(), 6);
    }
}
