use serde::Serialize;

use crate::domain::Filter;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FiltersJson<'a> {
    group_op: &'static str,
    rules: Vec<RuleJson<'a>>,
}

#[derive(Debug, Serialize)]
struct RuleJson<'a> {
    field: &'a str,
    op: &'static str,
    data: &'a str,
}

/// Encode a filter into the `filters` form value.
pub fn encode_filters(filter: &Filter) -> Result<String, serde_json::Error> {
    serde_json::to_string(&FiltersJson {
        group_op: filter.group_op.as_str(),
        rules: filter
            .rules
            .iter()
            .map(|rule| RuleJson {
                field: &rule.field,
                op: rule.op.code(),
                data: &rule.data,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterOp, GroupOp, Rule};

    #[test]
    fn encodes_single_rule_in_wire_order() {
        let filter = Filter::new(GroupOp::And, vec![Rule::eq("productId", "42")]);
        assert_eq!(
            encode_filters(&filter).unwrap(),
            r#"{"groupOp":"AND","rules":[{"field":"productId","op":"eq","data":"42"}]}"#
        );
    }

    #[test]
    fn encodes_or_group_and_escapes_data() {
        let filter = Filter::new(
            GroupOp::Or,
            vec![
                Rule::new("lastName", FilterOp::BeginsWith, "O\"Brien"),
                Rule::new("regionId", FilterOp::NotEqual, "3"),
            ],
        );
        assert_eq!(
            encode_filters(&filter).unwrap(),
            r#"{"groupOp":"OR","rules":[{"field":"lastName","op":"bw","data":"O\"Brien"},{"field":"regionId","op":"ne","data":"3"}]}"#
        );
    }

    #[test]
    fn encodes_empty_rule_list() {
        let filter = Filter::default();
        assert_eq!(
            encode_filters(&filter).unwrap(),
            r#"{"groupOp":"AND","rules":[]}"#
        );
    }
}
