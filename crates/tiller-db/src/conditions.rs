use sqlx::{QueryBuilder, Sqlite};

use tiller_data::Condition;

/// Append filter conditions to a query ending in `WHERE 1`. Column
/// names come from the allow-listed filter lowering, values are always
/// bound parameters.
pub(crate) fn push_conditions(qry: &mut QueryBuilder<'_, Sqlite>, conditions: &[Condition]) {
    for condition in conditions {
        qry.push(" AND ");
        push_condition(qry, condition);
    }
}

fn push_condition(qry: &mut QueryBuilder<'_, Sqlite>, condition: &Condition) {
    match condition {
        Condition::Eq(column, value) => {
            qry.push(format!("{} = ", column));
            qry.push_bind(*value);
        }
        Condition::Contains(column, text) => {
            qry.push(format!("{} LIKE ", column));
            qry.push_bind(format!("%{}%", text));
        }
        Condition::StartsWith(column, text) => {
            qry.push(format!("{} LIKE ", column));
            qry.push_bind(format!("{}%", text));
        }
        Condition::AtLeast(column, value) => {
            qry.push(format!("{} >= ", column));
            qry.push_bind(*value);
        }
        Condition::AnyOf(inner) => push_group(qry, inner, " OR "),
        Condition::AllOf(inner) => push_group(qry, inner, " AND "),
    }
}

fn push_group(qry: &mut QueryBuilder<'_, Sqlite>, inner: &[Condition], separator: &str) {
    qry.push("(");
    for (i, condition) in inner.iter().enumerate() {
        if i > 0 {
            qry.push(separator);
        }
        push_condition(qry, condition);
    }
    qry.push(")");
}

pub(crate) fn order_by(column: &str, descending: bool) -> String {
    let direction = if descending { "DESC" } else { "ASC" };
    format!(" ORDER BY {} {}", column, direction)
}
