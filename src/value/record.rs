use super::Value;
use std::fmt::{self, Display, Formatter};

/// One emitted object: `class` and `id` first, then fields in the order they
/// were first written.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(class_name: &str, id: Value) -> Self {
        Self {
            fields: vec![
                ("class".to_owned(), Value::from(class_name)),
                ("id".to_owned(), id),
            ],
        }
    }

    /// Overwrites in place so a field keeps its original position.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_owned(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let fields: Vec<String> = self
            .iter()
            .map(|(field, value)| match value {
                Value::String(s) => format!("{}: {:?}", field, s),
                other => format!("{}: {}", field, other),
            })
            .collect();

        write!(f, "{{{}}}", fields.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_field_order() {
        let mut record = Record::new("Player", Value::integer(1));
        record.set("score", Value::integer(10));
        record.set("name", Value::from("Ann"));
        record.set("score", Value::integer(12));

        let names: Vec<&str> = record.iter().map(|(field, _)| field).collect();
        assert_eq!(names, vec!["class", "id", "score", "name"]);
        assert_eq!(record.get("score"), Some(&Value::integer(12)));
        assert_eq!(record.len(), 4);
        assert_eq!(
            record.to_string(),
            "{class: \"Player\", id: 1, score: 12, name: \"Ann\"}"
        );
    }
}
