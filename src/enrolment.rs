use serde_json::Value;

/// Course names from a user's `course` field, which is either a comma separated string or a list.
pub fn courses_of(value: &Value) -> Vec<String> {
    let names: Vec<&str> = match value {
        Value::String(courses) => courses.split(',').collect(),
        Value::Array(courses) => courses.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// A student enrolled in a single course has it selected for them.
pub fn auto_selected_course(courses: &[String]) -> Option<&str> {
    match courses {
        [only] => Some(only.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_separated() {
        assert_eq!(
            courses_of(&json!("Tally Prime, Advanced Excel ,,  ")),
            vec!["Tally Prime", "Advanced Excel"]
        );
    }

    #[test]
    fn list_drops_blanks() {
        assert_eq!(
            courses_of(&json!(["DCA", " ", "", null, 3, "GST "])),
            vec!["DCA", "GST"]
        );
    }

    #[test]
    fn other_shapes_are_empty() {
        assert!(courses_of(&json!(null)).is_empty());
        assert!(courses_of(&json!({"course": "DCA"})).is_empty());
        assert!(courses_of(&json!("")).is_empty());
    }

    #[test]
    fn single_course_is_selected() {
        let one = courses_of(&json!("DCA"));
        assert_eq!(auto_selected_course(&one), Some("DCA"));
        let two = courses_of(&json!("DCA, GST"));
        assert_eq!(auto_selected_course(&two), None);
        assert_eq!(auto_selected_course(&[]), None);
    }
}
