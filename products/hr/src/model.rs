use entity::employees;
use serde::{Deserialize, Serialize};

/// An employee record. `id` is `None` until the record has been saved.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_fields() {
        let employee = Employee::new("Dipanjan", "Das", "das.dtx@hotmail.com").with_id(3);
        assert_eq!(
            serde_json::to_value(&employee).unwrap(),
            json!({
                "id": 3,
                "firstName": "Dipanjan",
                "lastName": "Das",
                "email": "das.dtx@hotmail.com"
            })
        );
    }

    #[test]
    fn unsaved_records_carry_a_null_id() {
        let value = serde_json::to_value(Employee::new("Bidisa", "Das", "b@x.test")).unwrap();
        assert!(value["id"].is_null());
    }

    #[test]
    fn id_is_optional_when_reading() {
        let employee: Employee = serde_json::from_value(json!({
            "firstName": "Bidisa",
            "lastName": "Das",
            "email": "das.bidisa@hotmail.com"
        }))
        .unwrap();
        assert_eq!(employee.id, None);
        assert_eq!(employee.first_name, "Bidisa");
    }

    #[test]
    fn converts_from_entity_model() {
        let model = employees::Model {
            id: 9,
            first_name: "Satyaranjan".into(),
            last_name: "Das".into(),
            email: "das.satyaranjan@hotmail.com".into(),
        };
        let employee = Employee::from(model);
        assert_eq!(employee.id, Some(9));
        assert_eq!(employee.email, "das.satyaranjan@hotmail.com");
    }
}
