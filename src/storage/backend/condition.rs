//! Clause list → SeaORM `Condition`

use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition, Value};
use tracing::warn;

use crate::filter::{Clause, ClauseValue, Column, LIKE_ESCAPE, Operator, SortBy};
use migration::entities::link;

pub(super) fn entity_column(column: Column) -> link::Column {
    match column {
        Column::Keyword => link::Column::Keyword,
        Column::Url => link::Column::Url,
        Column::Title => link::Column::Title,
        Column::Ip => link::Column::Ip,
        Column::Timestamp => link::Column::Timestamp,
        Column::Clicks => link::Column::Clicks,
    }
}

pub(super) fn sort_column(sort_by: SortBy) -> link::Column {
    entity_column(sort_by.column())
}

fn scalar(value: &ClauseValue) -> Option<Value> {
    match value {
        ClauseValue::Text(text) => Some(text.clone().into()),
        ClauseValue::Integer(n) => Some((*n).into()),
        ClauseValue::DateTime(at) => Some((*at).into()),
        ClauseValue::Range(..) => None,
    }
}

/// 所有子句以 AND 组合；操作符与值类型不匹配的子句被跳过
pub fn build_condition(clauses: &[Clause]) -> Condition {
    clauses.iter().fold(Condition::all(), |condition, clause| {
        let column = entity_column(clause.column);
        let expr = match (clause.operator, &clause.value) {
            (Operator::Like, ClauseValue::Text(pattern)) => Some(Condition::all().add(
                column.like(LikeExpr::new(pattern.as_str()).escape(LIKE_ESCAPE)),
            )),
            // 半开区间：start <= ts < end
            (Operator::Range, ClauseValue::Range(start, end)) => Some(
                Condition::all()
                    .add(column.gte(*start))
                    .add(column.lt(*end)),
            ),
            (Operator::GreaterThan, value) => {
                scalar(value).map(|v| Condition::all().add(column.gt(v)))
            }
            (Operator::LessThan, value) => {
                scalar(value).map(|v| Condition::all().add(column.lt(v)))
            }
            _ => None,
        };
        match expr {
            Some(expr) => condition.add(expr),
            None => {
                warn!("Skipping malformed clause: {}", clause);
                condition
            }
        }
    })
}
