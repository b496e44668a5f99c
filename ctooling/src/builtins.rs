//! Builtin tools: a small arithmetic calculator and an echo tool.

use std::iter::Peekable;
use std::str::Chars;

use cprovider::ToolDefinition;
use serde_json::{Value, json};

use crate::{FunctionTool, ToolError, ToolRegistry};

/// Registry pre-populated with every builtin, in a stable order.
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(calculator_tool());
    registry.register(echo_tool());
    registry
}

pub fn calculator_tool() -> FunctionTool {
    FunctionTool::new(
        ToolDefinition {
            name: "calculator".to_string(),
            description: "Evaluates an arithmetic expression with +, -, *, / and parentheses"
                .to_string(),
            parameters: json!({
                "type": "object",
                "required": ["expression"],
                "properties": {
                    "expression": {"type": "string"}
                }
            }),
        },
        |args, _ctx| async move {
            let expression = args
                .get("expression")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::invalid_arguments("missing string 'expression'"))?;

            let result = evaluate(expression)?;
            // Whole results render as integers, matching what a model expects
            // to read back.
            if result.fract() == 0.0 && result.is_finite() && result.abs() < i64::MAX as f64 {
                Ok(json!(result as i64))
            } else {
                Ok(json!(result))
            }
        },
    )
}

pub fn echo_tool() -> FunctionTool {
    FunctionTool::new(
        ToolDefinition {
            name: "echo".to_string(),
            description: "Returns the provided text unchanged".to_string(),
            parameters: json!({
                "type": "object",
                "required": ["text"],
                "properties": {
                    "text": {"type": "string"}
                }
            }),
        },
        |args, _ctx| async move {
            let text = args
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::invalid_arguments("missing string 'text'"))?;
            Ok(json!(text))
        },
    )
}

fn evaluate(expression: &str) -> Result<f64, ToolError> {
    let mut parser = Parser {
        chars: expression.chars().peekable(),
    };
    let value = parser.expression()?;
    parser.skip_whitespace();
    if parser.chars.peek().is_some() {
        return Err(ToolError::execution(format!(
            "unexpected trailing input in expression '{expression}'"
        )));
    }
    Ok(value)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn expression(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some('+') => {
                    self.chars.next();
                    value += self.term()?;
                }
                Some('-') => {
                    self.chars.next();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some('*') => {
                    self.chars.next();
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.chars.next();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ToolError::execution("division by zero"));
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, ToolError> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some('-') => {
                self.chars.next();
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.chars.next();
                let value = self.expression()?;
                self.skip_whitespace();
                if self.chars.next() != Some(')') {
                    return Err(ToolError::execution("unbalanced parentheses"));
                }
                Ok(value)
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Result<f64, ToolError> {
        let mut digits = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                digits.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }

        digits
            .parse::<f64>()
            .map_err(|_| ToolError::execution("expected a number"))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.chars.next();
        }
    }
}
