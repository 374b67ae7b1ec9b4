use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Condition, Page, SortSpec};

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub wyc_number: u32,
    pub first: Option<String>,
    pub last: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone1: Option<String>,
    pub phone2: Option<String>,
    pub email: Option<String>,
    pub category: Option<u32>,
    pub expire_qtr: u32,
    pub student_id: Option<u32>,
    /// Stored legacy password hash. A member without one can not log in.
    pub password: Option<String>,
    pub out_to_sea: bool,
    pub join_date: NaiveDateTime,
}

impl Member {
    /// Display name, as far as the roster knows one.
    pub fn display_name(&self) -> String {
        let first = self.first.as_deref().unwrap_or("");
        let last = self.last.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }
}

/// How to compare the expiration quarter marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QtrMode {
    #[default]
    Exactly,
    AtLeast,
}

/// Member listing order. Only these fields are sortable; everything
/// else a caller asks for degrades to the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MemberOrder {
    ExpireQtr { descending: bool },
    JoinDate { descending: bool },
}

impl Default for MemberOrder {
    /// Newest members first.
    fn default() -> Self {
        MemberOrder::JoinDate { descending: true }
    }
}

impl MemberOrder {
    /// Map a caller-supplied sort spec onto the allow-list. Unsupported
    /// fields never error, they fall back to the default order.
    pub fn resolve(sort: Option<&SortSpec>) -> Self {
        match sort {
            Some(sort) if sort.field == "expireQtr" => MemberOrder::ExpireQtr {
                descending: sort.descending,
            },
            Some(sort) if sort.field == "joinDate" => MemberOrder::JoinDate {
                descending: sort.descending,
            },
            _ => MemberOrder::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFilter {
    /// Exact WYC number as typed into the search box. Skipped when it
    /// does not parse as an integer.
    pub wyc_id: Option<String>,
    /// Free-text name search, tokenized on whitespace.
    pub name: Option<String>,
    pub category: Option<u32>,
    pub expire_qtr: Option<u32>,
    pub expire_qtr_mode: QtrMode,
    #[serde(default)]
    pub order: MemberOrder,
    pub page: Option<Page>,
}

impl MemberFilter {
    /// Lower the filter into predicate conditions. All conditions are
    /// combined with AND by the query layer.
    pub fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();

        if let Some(wyc_id) = &self.wyc_id {
            if let Ok(number) = wyc_id.trim().parse::<i64>() {
                conditions.push(Condition::Eq("wyc_number", number));
            }
        }

        if let Some(name) = &self.name {
            if let Some(condition) = name_condition(name) {
                conditions.push(condition);
            }
        }

        if let Some(category) = self.category {
            conditions.push(Condition::Eq("category", category as i64));
        }

        if let Some(expire_qtr) = self.expire_qtr {
            conditions.push(match self.expire_qtr_mode {
                QtrMode::AtLeast => Condition::AtLeast("expire_qtr", expire_qtr as i64),
                QtrMode::Exactly => Condition::Eq("expire_qtr", expire_qtr as i64),
            });
        }

        conditions
    }
}

/// Tokenize a name search. A single token may appear anywhere in the
/// first or last name. With more tokens the first one is a substring
/// match on the first name and the rest form a prefix match on the
/// last name, so "John Mc" finds "Johnny McAllister" while a middle
/// initial in the first field still tolerates it.
fn name_condition(name: &str) -> Option<Condition> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => None,
        [token] => Some(Condition::AnyOf(vec![
            Condition::Contains("first", token.to_string()),
            Condition::Contains("last", token.to_string()),
        ])),
        [first, rest @ ..] => Some(Condition::AllOf(vec![
            Condition::Contains("first", first.to_string()),
            Condition::StartsWith("last", rest.join(" ")),
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wyc_id_condition() {
        let filter = MemberFilter {
            wyc_id: Some("42".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.conditions(), vec![Condition::Eq("wyc_number", 42)]);
    }

    #[test]
    fn test_wyc_id_not_numeric_is_skipped() {
        let filter = MemberFilter {
            wyc_id: Some("forty-two".to_string()),
            ..Default::default()
        };
        assert!(filter.conditions().is_empty());
    }

    #[test]
    fn test_name_single_token() {
        let condition = name_condition("mc").unwrap();
        assert_eq!(
            condition,
            Condition::AnyOf(vec![
                Condition::Contains("first", "mc".to_string()),
                Condition::Contains("last", "mc".to_string()),
            ])
        );
    }

    #[test]
    fn test_name_two_tokens_is_asymmetric() {
        let condition = name_condition("John Mc").unwrap();
        assert_eq!(
            condition,
            Condition::AllOf(vec![
                Condition::Contains("first", "John".to_string()),
                Condition::StartsWith("last", "Mc".to_string()),
            ])
        );
    }

    #[test]
    fn test_name_extra_tokens_join_into_last() {
        let condition = name_condition("  Mary  van der Berg ").unwrap();
        assert_eq!(
            condition,
            Condition::AllOf(vec![
                Condition::Contains("first", "Mary".to_string()),
                Condition::StartsWith("last", "van der Berg".to_string()),
            ])
        );
    }

    #[test]
    fn test_name_blank_is_skipped() {
        assert_eq!(name_condition("   "), None);
        let filter = MemberFilter {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.conditions().is_empty());
    }

    #[test]
    fn test_expire_qtr_modes() {
        let filter = MemberFilter {
            expire_qtr: Some(5),
            ..Default::default()
        };
        assert_eq!(filter.conditions(), vec![Condition::Eq("expire_qtr", 5)]);

        let filter = MemberFilter {
            expire_qtr: Some(5),
            expire_qtr_mode: QtrMode::AtLeast,
            ..Default::default()
        };
        assert_eq!(
            filter.conditions(),
            vec![Condition::AtLeast("expire_qtr", 5)]
        );
    }

    #[test]
    fn test_conditions_combine() {
        let filter = MemberFilter {
            wyc_id: Some("7".to_string()),
            name: Some("smith".to_string()),
            category: Some(2),
            expire_qtr: Some(12),
            expire_qtr_mode: QtrMode::AtLeast,
            ..Default::default()
        };
        assert_eq!(filter.conditions().len(), 4);
    }

    #[test]
    fn test_order_resolve_allow_list() {
        let sort = SortSpec {
            field: "expireQtr".to_string(),
            descending: false,
        };
        assert_eq!(
            MemberOrder::resolve(Some(&sort)),
            MemberOrder::ExpireQtr { descending: false }
        );

        let sort = SortSpec {
            field: "joinDate".to_string(),
            descending: true,
        };
        assert_eq!(
            MemberOrder::resolve(Some(&sort)),
            MemberOrder::JoinDate { descending: true }
        );
    }

    #[test]
    fn test_order_resolve_fallback() {
        // Unsupported sort fields silently use the default order
        let sort = SortSpec {
            field: "first".to_string(),
            descending: false,
        };
        assert_eq!(MemberOrder::resolve(Some(&sort)), MemberOrder::default());
        assert_eq!(MemberOrder::resolve(None), MemberOrder::default());
    }

    #[test]
    fn test_display_name() {
        let member = Member {
            first: Some("Johnny".to_string()),
            last: Some("McAllister".to_string()),
            ..Default::default()
        };
        assert_eq!(member.display_name(), "Johnny McAllister");

        let member = Member::default();
        assert_eq!(member.display_name(), "");
    }
}
