#[cfg(test)]
mod tests {
    use crate::{delimited, jsonlines};
    use querybench_core::Value;

    const START: &str = r#"{"message_type":"START","result_columns":[{"name":"street_name","type":"text"},{"name":"violations","type":"long"}]}"#;

    #[test]
    fn schema_then_data_yields_rows_in_arrival_order() {
        let raw = format!(
            "{START}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Broadway\",120],[\"Bowery\",45]]}}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Houston St\",7]]}}\n\
             {{\"message_type\":\"FINISH_SUCCESSFULLY\"}}\n"
        );
        let set = jsonlines::decode(&raw);
        assert_eq!(set.columns, vec!["street_name", "violations"]);
        assert_eq!(set.row_count(), 3);
        assert_eq!(set.get(0, "street_name"), Some(&Value::Text("Broadway".into())));
        assert_eq!(set.get(1, "violations"), Some(&Value::Int(45)));
        assert_eq!(set.get(2, "street_name"), Some(&Value::Text("Houston St".into())));
    }

    #[test]
    fn missing_schema_yields_empty_set() {
        let raw = r#"{"message_type":"DATA","data":[["Broadway",120]]}"#;
        let set = jsonlines::decode(raw);
        assert!(set.is_empty());
        assert!(set.columns.is_empty());
    }

    #[test]
    fn schema_without_data_yields_empty_set() {
        let set = jsonlines::decode(START);
        assert!(set.is_empty());
    }

    #[test]
    fn message_split_across_lines_matches_unsplit_decode() {
        let unsplit = format!(
            "{START}\n{{\"message_type\":\"DATA\",\"data\":[[\"Broadway\",120]]}}\n"
        );
        let split = format!(
            "{START}\n\
             {{\"message_type\":\"DATA\",\n\
             \"data\":[[\"Broadway\",\n\
             120]]}}\n"
        );
        let a = jsonlines::decode(&unsplit);
        let b = jsonlines::decode(&split);
        assert_eq!(a.columns, b.columns);
        assert_eq!(a.rows, b.rows);
        assert_eq!(b.row_count(), 1);
    }

    #[test]
    fn control_bytes_and_metadata_lines_are_ignored() {
        let raw = format!(
            "Time: 0.012s\n\
             Request Id: ab-12\n\
             \u{1b}\u{1b}{START}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Broadway\",\u{7}120]]}}\n"
        );
        let set = jsonlines::decode(&raw);
        assert_eq!(set.row_count(), 1);
        assert_eq!(set.get(0, "violations"), Some(&Value::Int(120)));
    }

    #[test]
    fn malformed_candidates_are_skipped() {
        let raw = format!(
            "{START}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Broadway\",}}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Bowery\",45]]}}\n\
             not json at all\n"
        );
        let set = jsonlines::decode(&raw);
        assert_eq!(set.row_count(), 1);
        assert_eq!(set.get(0, "street_name"), Some(&Value::Text("Bowery".into())));
    }

    #[test]
    fn rows_with_wrong_arity_are_dropped() {
        let raw = format!(
            "{START}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Broadway\",120],[\"Bowery\"]]}}\n"
        );
        let set = jsonlines::decode(&raw);
        assert_eq!(set.row_count(), 1);
    }

    #[test]
    fn scalar_kinds_survive_decoding() {
        let raw = r#"{"message_type":"START","result_columns":[{"name":"a"},{"name":"b"},{"name":"c"},{"name":"d"}]}
{"message_type":"DATA","data":[[null,true,2.5,"x"]]}"#;
        let set = jsonlines::decode(raw);
        assert_eq!(
            set.rows[0],
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Float(2.5),
                Value::Text("x".into())
            ]
        );
    }

    #[test]
    fn unknown_message_types_are_ignored() {
        let raw = format!(
            "{{\"message_type\":\"PROGRESS\",\"pct\":50}}\n\
             {START}\n\
             {{\"message_type\":\"DATA\",\"data\":[[\"Broadway\",120]]}}\n"
        );
        let set = jsonlines::decode(&raw);
        assert_eq!(set.row_count(), 1);
    }

    #[test]
    fn delimited_header_and_rows_parse() {
        let raw = "street_name,violations,avg_fine\n\
                   Broadway,120,65.5\n\
                   \"Main, North\",3,40\n";
        let set = delimited::decode(raw, ',');
        assert_eq!(set.columns, vec!["street_name", "violations", "avg_fine"]);
        assert_eq!(set.row_count(), 2);
        assert_eq!(set.get(0, "avg_fine"), Some(&Value::Float(65.5)));
        assert_eq!(set.get(1, "street_name"), Some(&Value::Text("Main, North".into())));
        assert_eq!(set.get(1, "avg_fine"), Some(&Value::Int(40)));
    }

    #[test]
    fn delimited_quoted_quote_and_empty_field() {
        let raw = "name,note\n\
                   \"O\"\"Brien\",\n";
        let set = delimited::decode(raw, ',');
        assert_eq!(set.get(0, "name"), Some(&Value::Text("O\"Brien".into())));
        assert_eq!(set.get(0, "note"), Some(&Value::Null));
    }

    #[test]
    fn delimited_header_only_is_empty() {
        let set = delimited::decode("a,b,c\n", ',');
        assert!(set.is_empty());
    }

    #[test]
    fn delimited_short_rows_are_dropped() {
        let raw = "a,b\n1,2\n3\n4,5\n";
        let set = delimited::decode(raw, ',');
        assert_eq!(set.row_count(), 2);
    }

    #[test]
    fn delimited_blank_input_is_empty() {
        assert!(delimited::decode("", ',').is_empty());
        assert!(delimited::decode("\nTime: 1ms\n", ',').is_empty());
    }
}
