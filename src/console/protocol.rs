//! Console command protocol
//!
//! One command per line, either as words (`filter category laptop`) or as
//! a JSON object (`{"type":"filter_category","value":"laptop"}`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{
    category_label, FilterState, Product, ProductCondition, SortOption, CATEGORIES,
};
use crate::state::DashboardStatus;

/// Requests typed at the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Begin analysis
    Start,

    /// End analysis
    Stop,

    /// Reset confidence and indicators
    Reset,

    /// Show the dashboard
    Status,

    /// List products passing the current filters
    Products,

    /// Restrict to a category; `None` clears it
    FilterCategory { value: Option<String> },

    /// Restrict to a condition; `None` clears it
    FilterCondition { value: Option<ProductCondition> },

    /// Free-text search over title, brand and description
    Search { text: String },

    /// Change the sort order
    Sort { by: SortOption },

    /// Restore default filters
    ClearFilters,

    /// Show or hide the filter panel
    ToggleFilters,

    /// Open the detail view of a product
    Show { id: String },

    /// Close the detail view
    Close,

    /// List filter and sort options
    Options,

    Help,

    Quit,
}

/// Errors from parsing a command line
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("malformed JSON command: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Unknown(_) => "unknown_command",
            CommandError::MissingArgument { .. } => "missing_argument",
            CommandError::InvalidValue { .. } => "invalid_value",
            CommandError::Json(_) => "malformed_json",
        }
    }
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Request>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let request = if line.starts_with('{') {
        serde_json::from_str(line)?
    } else {
        parse_words(line)?
    };

    validate(&request)?;
    Ok(Some(request))
}

fn parse_words(line: &str) -> Result<Request, CommandError> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let request = match command.to_ascii_lowercase().as_str() {
        "start" => Request::Start,
        "stop" => Request::Stop,
        "reset" => Request::Reset,
        "status" => Request::Status,
        "products" | "ls" => Request::Products,
        "filter" => parse_filter(rest)?,
        "search" => Request::Search {
            text: rest.to_string(),
        },
        "sort" => {
            let value = required(rest, "sort", "an order (newest, price_low, price_high)")?;
            let by = value.parse().map_err(|_| CommandError::InvalidValue {
                field: "sort order",
                value: value.to_string(),
            })?;
            Request::Sort { by }
        }
        "clear-filters" | "clear" => Request::ClearFilters,
        "filters" => Request::ToggleFilters,
        "show" => Request::Show {
            id: required(rest, "show", "a product id")?.to_string(),
        },
        "close" => Request::Close,
        "options" => Request::Options,
        "help" | "?" => Request::Help,
        "quit" | "exit" => Request::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(request)
}

fn parse_filter(rest: &str) -> Result<Request, CommandError> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    let value = required(value, "filter", "a field and a value")?;
    let value = (value != "all").then(|| value.to_string());

    match field {
        "category" => Ok(Request::FilterCategory { value }),
        "condition" => {
            let value = value
                .map(|v| {
                    ProductCondition::parse(&v).ok_or(CommandError::InvalidValue {
                        field: "condition",
                        value: v,
                    })
                })
                .transpose()?;
            Ok(Request::FilterCondition { value })
        }
        other => Err(CommandError::InvalidValue {
            field: "filter field",
            value: other.to_string(),
        }),
    }
}

fn required<'a>(
    value: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(value)
    }
}

// Checks that apply to both word and JSON forms.
fn validate(request: &Request) -> Result<(), CommandError> {
    if let Request::FilterCategory { value: Some(category) } = request {
        if category_label(category).is_none() {
            return Err(CommandError::InvalidValue {
                field: "category",
                value: category.clone(),
            });
        }
    }
    Ok(())
}

/// Console replies
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Dashboard status
    Status(DashboardStatus),

    /// Command forwarded to the dashboard
    Accepted { command: &'static str },

    /// Filtered product list
    Products {
        filters: FilterState,
        /// Whether the filter panel is open
        filter_panel: bool,
        /// Product whose detail view is open
        selected: Option<String>,
        products: Vec<Product>,
    },

    /// Filters changed
    Filters { filters: FilterState },

    /// Filter panel visibility changed
    FilterPanel { shown: bool },

    /// Detail view of one product
    Detail { product: Product },

    /// Detail view closed
    Closed,

    /// Available filter and sort values
    Options {
        categories: Vec<OptionEntry>,
        conditions: Vec<OptionEntry>,
        sort: Vec<OptionEntry>,
    },

    Help { commands: &'static [&'static str] },

    Error { code: String, message: String },
}

/// A selectable filter or sort value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

impl Response {
    /// The option tables behind the filter panel
    pub fn options() -> Self {
        Response::Options {
            categories: CATEGORIES
                .iter()
                .map(|&(value, label)| OptionEntry { value, label })
                .collect(),
            conditions: ProductCondition::ALL
                .iter()
                .map(|c| OptionEntry {
                    value: c.as_str(),
                    label: c.label(),
                })
                .collect(),
            sort: SortOption::ALL
                .iter()
                .map(|o| OptionEntry {
                    value: o.as_str(),
                    label: o.label(),
                })
                .collect(),
        }
    }
}

impl From<CommandError> for Response {
    fn from(e: CommandError) -> Self {
        Response::Error {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_commands() {
        assert_eq!(parse_line("start").unwrap(), Some(Request::Start));
        assert_eq!(parse_line("  STOP ").unwrap(), Some(Request::Stop));
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(
            parse_line("show 3").unwrap(),
            Some(Request::Show { id: "3".into() })
        );
        assert_eq!(
            parse_line("search magic keyboard").unwrap(),
            Some(Request::Search {
                text: "magic keyboard".into()
            })
        );
    }

    #[test]
    fn test_filter_commands() {
        assert_eq!(
            parse_line("filter category laptop").unwrap(),
            Some(Request::FilterCategory {
                value: Some("laptop".into())
            })
        );
        assert_eq!(
            parse_line("filter condition for_parts").unwrap(),
            Some(Request::FilterCondition {
                value: Some(ProductCondition::ForParts)
            })
        );
        assert_eq!(
            parse_line("filter condition all").unwrap(),
            Some(Request::FilterCondition { value: None })
        );
    }

    #[test]
    fn test_sort_command() {
        assert_eq!(
            parse_line("sort price_high").unwrap(),
            Some(Request::Sort {
                by: SortOption::PriceHigh
            })
        );
        assert!(matches!(
            parse_line("sort"),
            Err(CommandError::MissingArgument { command: "sort", .. })
        ));
    }

    #[test]
    fn test_json_commands() {
        assert_eq!(
            parse_line(r#"{"type":"start"}"#).unwrap(),
            Some(Request::Start)
        );
        assert_eq!(
            parse_line(r#"{"type":"sort","by":"price_low"}"#).unwrap(),
            Some(Request::Sort {
                by: SortOption::PriceLow
            })
        );
        assert!(matches!(
            parse_line(r#"{"type":"launch"}"#),
            Err(CommandError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse_line("dance"),
            Err(CommandError::Unknown(ref c)) if c == "dance"
        ));
        assert!(matches!(
            parse_line("filter category phones"),
            Err(CommandError::InvalidValue { field: "category", .. })
        ));
        assert!(matches!(
            parse_line(r#"{"type":"filter_category","value":"phones"}"#),
            Err(CommandError::InvalidValue { field: "category", .. })
        ));
        assert!(matches!(
            parse_line("filter condition mint"),
            Err(CommandError::InvalidValue { field: "condition", .. })
        ));
        assert!(matches!(
            parse_line("filter color red"),
            Err(CommandError::InvalidValue { field: "filter field", .. })
        ));
        assert!(matches!(
            parse_line("filter"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_options_response() {
        let json = serde_json::to_value(Response::options()).unwrap();
        assert_eq!(json["type"], "options");
        assert_eq!(json["categories"].as_array().unwrap().len(), 5);
        assert_eq!(json["conditions"][3]["value"], "for_parts");
        assert_eq!(json["sort"][1]["label"], "Price: Low to High");
    }

    #[test]
    fn test_error_response() {
        let response = Response::from(CommandError::Unknown("dance".into()));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("unknown_command"));
        assert!(json.contains("dance"));
    }
}
