//! Calculator tool definition.

use std::fmt;
use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::common::text_content;
use crate::domains::tools::contract::{FieldSpec, TypeContract, text_content_contract};
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        };
        f.write_str(symbol)
    }
}

/// Parameters for the calculator tool.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorParams {
    pub a: f64,
    pub b: f64,
    pub operator: Operator,
}

/// Calculator tool - applies one arithmetic operator to two numbers.
pub struct CalculatorTool;

impl CalculatorTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Perform a basic arithmetic operation (+, -, *, /) on two numbers.";

    pub fn input_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("a", TypeContract::Number).describe("First operand"),
            FieldSpec::required("b", TypeContract::Number).describe("Second operand"),
            FieldSpec::required("operator", TypeContract::string_enum(["+", "-", "*", "/"]))
                .describe("Operator to apply"),
        ])
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(Self))
            .with_output(text_content_contract())
    }

    /// Compute `a operator b`.
    pub fn compute(params: &CalculatorParams) -> anyhow::Result<f64> {
        let CalculatorParams { a, b, operator } = *params;
        Ok(match operator {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => {
                if b == 0.0 {
                    bail!("Division by zero is not allowed");
                }
                a / b
            }
        })
    }

    /// Render the equation, e.g. `6 / 4 = 1.5`.
    pub fn equation(params: &CalculatorParams, result: f64) -> String {
        format!("{} {} {} = {}", params.a, params.operator, params.b, result)
    }
}

#[async_trait]
impl ToolHandler for CalculatorTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: CalculatorParams = parse_input(input)?;
        let result = Self::compute(&params)?;
        let equation = Self::equation(&params, result);
        info!("Calculated {}", equation);
        Ok(text_content(format!("Result: {equation}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(a: f64, operator: Operator, b: f64) -> CalculatorParams {
        CalculatorParams { a, b, operator }
    }

    #[test]
    fn test_compute_each_operator() {
        assert_eq!(CalculatorTool::compute(&params(4.0, Operator::Add, 2.0)).unwrap(), 6.0);
        assert_eq!(CalculatorTool::compute(&params(4.0, Operator::Subtract, 2.0)).unwrap(), 2.0);
        assert_eq!(CalculatorTool::compute(&params(4.0, Operator::Multiply, 2.5)).unwrap(), 10.0);
        assert_eq!(CalculatorTool::compute(&params(6.0, Operator::Divide, 4.0)).unwrap(), 1.5);
    }

    #[test]
    fn test_division_by_zero() {
        for a in [0.0, 1.0, -7.5, f64::MAX] {
            let err = CalculatorTool::compute(&params(a, Operator::Divide, 0.0)).unwrap_err();
            assert!(err.to_string().contains("Division by zero"));
        }
        assert!(CalculatorTool::compute(&params(1.0, Operator::Divide, -0.0)).is_err());
    }

    #[test]
    fn test_zero_divisor_allowed_for_other_operators() {
        assert_eq!(CalculatorTool::compute(&params(3.0, Operator::Multiply, 0.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_equation_uses_float_arithmetic() {
        let p = params(0.1, Operator::Add, 0.2);
        let result = CalculatorTool::compute(&p).unwrap();
        assert_eq!(CalculatorTool::equation(&p, result), "0.1 + 0.2 = 0.30000000000000004");
    }

    #[tokio::test]
    async fn test_call_contains_equation() {
        let content = CalculatorTool
            .call(json!({ "a": 7, "b": 2, "operator": "-" }))
            .await
            .unwrap();
        assert!(content[0].as_text().unwrap().contains("7 - 2 = 5"));
    }
}
