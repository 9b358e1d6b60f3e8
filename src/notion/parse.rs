use serde_json::{Map, Value};

use super::records::{CircleRecord, InvalidRecord, PersonRef, RoleRecord};

const CIRCLE_ID: &str = "CircleID";
const CIRCLE_NAME: &str = "CircleName";
const ROLE_ID: &str = "RoleID";
const ROLE_NAME: &str = "RoleName";
const PURPOSE: &str = "Purpose";
const RESPONSIBILITIES: &str = "Responsibilities";
const PROJECTS: &str = "Projects";
const ASSIGNED_PEOPLE: &str = "Pessoas alocadas";
const AREA: &str = "Area";

pub fn decode_circles(results: &[Value]) -> Result<Vec<CircleRecord>, InvalidRecord> {
    let mut circles = results
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let fields = Fields::new(index, value)?;
            Ok(CircleRecord {
                circle_id: fields.text(CIRCLE_ID).unwrap_or_default(),
                name: fields.text(CIRCLE_NAME).unwrap_or_default(),
                purpose: fields.text(PURPOSE),
                responsibilities: fields.text(RESPONSIBILITIES),
                projects: fields.text(PROJECTS),
            })
        })
        .collect::<Result<Vec<_>, InvalidRecord>>()?;

    sort_by_name(&mut circles, |circle| circle.name.as_str());
    Ok(circles)
}

pub fn decode_roles(results: &[Value]) -> Result<Vec<RoleRecord>, InvalidRecord> {
    let mut roles = results
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let fields = Fields::new(index, value)?;
            Ok(RoleRecord {
                role_id: fields.text(ROLE_ID).unwrap_or_default(),
                name: fields.text(ROLE_NAME).unwrap_or_default(),
                circle_id: fields.text(CIRCLE_ID).unwrap_or_default(),
                purpose: fields.text(PURPOSE),
                responsibilities: fields.text(RESPONSIBILITIES),
                people: fields.people(ASSIGNED_PEOPLE),
                page_id: fields.page_id(),
                area: fields.text(AREA),
            })
        })
        .collect::<Result<Vec<_>, InvalidRecord>>()?;

    sort_by_name(&mut roles, |role| role.name.as_str());
    Ok(roles)
}

fn sort_by_name<T>(records: &mut [T], name: impl Fn(&T) -> &str) {
    records.sort_by_cached_key(|record| name(record).to_lowercase());
}

struct Fields<'a> {
    object: &'a Map<String, Value>,
    properties: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn new(index: usize, value: &'a Value) -> Result<Self, InvalidRecord> {
        let object = value.as_object().ok_or_else(|| InvalidRecord {
            index,
            reason: format!("expected an object, found {}", json_kind(value)),
        })?;
        let properties = object.get("properties").and_then(Value::as_object);
        Ok(Self { object, properties })
    }

    fn value(&self, name: &str) -> Option<&'a Value> {
        match self.properties {
            Some(properties) => properties.get(name),
            None => self.object.get(name),
        }
    }

    fn text(&self, name: &str) -> Option<String> {
        let value = self.value(name)?;
        let text = if self.properties.is_some() {
            property_text(value)
        } else {
            plain_text(value)
        };

        text.map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
    }

    fn people(&self, name: &str) -> Vec<PersonRef> {
        let Some(value) = self.value(name) else {
            return Vec::new();
        };

        let entries = if self.properties.is_some() {
            let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
            value.get(kind).and_then(Value::as_array)
        } else {
            value.as_array()
        };

        entries.into_iter().flatten().filter_map(person_ref).collect()
    }

    fn page_id(&self) -> Option<String> {
        ["pageId", "id"]
            .iter()
            .find_map(|key| self.object.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
    }
}

fn property_text(property: &Value) -> Option<String> {
    let kind = property.get("type").and_then(Value::as_str)?;
    let value = property.get(kind)?;

    match kind {
        "title" | "rich_text" => Some(rich_text(value)),
        "number" => value.as_f64().map(format_number),
        "select" | "status" => value.get("name").and_then(Value::as_str).map(str::to_owned),
        "multi_select" => Some(
            value
                .as_array()?
                .iter()
                .filter_map(|option| option.get("name").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        "formula" => formula_text(value),
        "unique_id" => value
            .get("number")
            .and_then(Value::as_f64)
            .map(format_number),
        "url" | "email" | "phone_number" => value.as_str().map(str::to_owned),
        _ => None,
    }
}

fn rich_text(value: &Value) -> String {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|span| span.get("plain_text").and_then(Value::as_str))
        .collect()
}

fn formula_text(formula: &Value) -> Option<String> {
    match formula.get("type").and_then(Value::as_str)? {
        "string" => formula.get("string")?.as_str().map(str::to_owned),
        "number" => formula.get("number")?.as_f64().map(format_number),
        "boolean" => formula.get("boolean")?.as_bool().map(|flag| flag.to_string()),
        _ => None,
    }
}

fn plain_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => number.as_f64().map(format_number),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn person_ref(value: &Value) -> Option<PersonRef> {
    let id = value.get("id").and_then(Value::as_str)?.to_owned();
    let title = ["title", "name"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned);
    Some(PersonRef { id, title })
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn title(text: &str) -> Value {
        json!({ "type": "title", "title": [{ "plain_text": text }] })
    }

    fn rich(text: &str) -> Value {
        json!({ "type": "rich_text", "rich_text": [{ "plain_text": text }] })
    }

    #[test]
    fn decodes_notion_role_pages() {
        let page = json!({
            "object": "page",
            "id": "1f2e-33aa",
            "properties": {
                "RoleName": title("Lead Link"),
                "RoleID": { "type": "unique_id", "unique_id": { "prefix": "R", "number": 7 } },
                "CircleID": { "type": "number", "number": 3.0 },
                "Purpose": rich("Keep the circle moving"),
                "Responsibilities": { "type": "rich_text", "rich_text": [
                    { "plain_text": "- Assign roles " },
                    { "plain_text": "- Set priorities" }
                ] },
                "Area": { "type": "select", "select": { "name": "Ops" } },
                "Pessoas alocadas": { "type": "people", "people": [
                    { "object": "user", "id": "u-1", "name": "Ana" },
                    { "object": "user", "id": "u-2" }
                ] }
            }
        });

        let roles = decode_roles(&[page]).expect("roles decode");
        assert_eq!(
            roles,
            vec![RoleRecord {
                role_id: "7".to_owned(),
                name: "Lead Link".to_owned(),
                circle_id: "3".to_owned(),
                purpose: Some("Keep the circle moving".to_owned()),
                responsibilities: Some("- Assign roles - Set priorities".to_owned()),
                people: vec![
                    PersonRef {
                        id: "u-1".to_owned(),
                        title: Some("Ana".to_owned()),
                    },
                    PersonRef {
                        id: "u-2".to_owned(),
                        title: None,
                    },
                ],
                page_id: Some("1f2e-33aa".to_owned()),
                area: Some("Ops".to_owned()),
            }]
        );
    }

    #[test]
    fn decodes_flat_records_and_formulas() {
        let flat = json!({
            "RoleID": "r1",
            "RoleName": "Lead",
            "CircleID": 1,
            "pageId": "abc-def",
            "Pessoas alocadas": [{ "id": "p1", "title": "Bia" }]
        });
        let page = json!({
            "id": "page-2",
            "properties": {
                "RoleName": title("Scribe"),
                "CircleID": { "type": "formula", "formula": { "type": "string", "string": " 2 " } },
                "Pessoas alocadas": { "type": "relation", "relation": [{ "id": "rel-1" }] }
            }
        });

        let roles = decode_roles(&[flat, page]).expect("roles decode");
        assert_eq!(roles[0].name, "Lead");
        assert_eq!(roles[0].circle_id, "1");
        assert_eq!(roles[0].page_id.as_deref(), Some("abc-def"));
        assert_eq!(roles[0].people[0].display_title(), "Bia");
        assert_eq!(roles[1].circle_id, "2");
        assert_eq!(roles[1].people[0].display_title(), "rel-1");
    }

    #[test]
    fn circles_are_sorted_by_name_case_insensitively() {
        let results = vec![
            json!({ "CircleID": "2", "CircleName": "delivery" }),
            json!({ "CircleID": "1", "CircleName": "Core", "Projects": "Atlas" }),
            json!({ "CircleID": "3", "CircleName": "" }),
        ];

        let circles = decode_circles(&results).expect("circles decode");
        let names = circles
            .iter()
            .map(|circle| circle.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["", "Core", "delivery"]);
        assert_eq!(circles[1].projects.as_deref(), Some("Atlas"));
    }

    #[test]
    fn blank_properties_decode_as_missing() {
        let page = json!({
            "id": "c-1",
            "properties": {
                "CircleName": title("Core"),
                "Purpose": rich("   "),
                "Responsibilities": { "type": "rich_text", "rich_text": [] }
            }
        });

        let circles = decode_circles(&[page]).expect("circles decode");
        assert_eq!(circles[0].purpose, None);
        assert_eq!(circles[0].responsibilities, None);
        assert_eq!(circles[0].circle_id, "");
    }

    #[test]
    fn non_object_elements_are_invalid() {
        let error = decode_circles(&[json!({ "CircleName": "ok" }), json!("nope")]).unwrap_err();
        assert_eq!(
            error,
            InvalidRecord {
                index: 1,
                reason: "expected an object, found a string".to_owned(),
            }
        );
    }

    #[test]
    fn whole_floats_format_without_fraction() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(2.5), "2.5");
    }
}
