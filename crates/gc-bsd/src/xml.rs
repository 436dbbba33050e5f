//! Decoding of BSD API XML responses.

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::directory::{ConstituentGroupRecord, ConstituentRecord, FormRecord};
use crate::error::{BsdError, BsdResult};

#[derive(Deserialize)]
struct ConsResponse {
    #[serde(default)]
    cons: Vec<ConsXml>,
}

#[derive(Deserialize)]
struct ConsXml {
    #[serde(rename = "@id")]
    id: i64,
    firstname: Option<String>,
    middlename: Option<String>,
    lastname: Option<String>,
    #[serde(default)]
    cons_email: Vec<ConsEmailXml>,
}

#[derive(Deserialize)]
struct ConsEmailXml {
    email: Option<String>,
    is_primary: Option<String>,
}

#[derive(Deserialize)]
struct FormResponse {
    signup_form: Option<FormXml>,
}

#[derive(Deserialize)]
struct FormXml {
    #[serde(rename = "@id")]
    id: i64,
    signup_form_name: Option<String>,
    signup_form_slug: Option<String>,
}

#[derive(Deserialize)]
struct GroupResponse {
    cons_group: Option<GroupXml>,
}

#[derive(Deserialize)]
struct GroupXml {
    #[serde(rename = "@id")]
    id: i64,
    name: Option<String>,
    slug: Option<String>,
    members: Option<i64>,
}

/// BSD renders absent values as empty elements.
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_error(e: quick_xml::DeError) -> BsdError {
    BsdError::Parse(e.to_string())
}

pub(crate) fn parse_constituents(body: &str) -> BsdResult<Vec<ConstituentRecord>> {
    let response: ConsResponse = from_str(body).map_err(parse_error)?;
    Ok(response
        .cons
        .into_iter()
        .map(|cons| {
            let primary = cons
                .cons_email
                .iter()
                .find(|e| e.is_primary.as_deref() == Some("1"))
                .or_else(|| cons.cons_email.first())
                .and_then(|e| non_empty(e.email.clone()));
            ConstituentRecord {
                id: cons.id,
                first_name: non_empty(cons.firstname),
                middle_name: non_empty(cons.middlename),
                last_name: non_empty(cons.lastname),
                email: primary,
            }
        })
        .collect())
}

pub(crate) fn parse_form(body: &str) -> BsdResult<FormRecord> {
    let response: FormResponse = from_str(body).map_err(parse_error)?;
    let form = response
        .signup_form
        .ok_or_else(|| BsdError::Parse("response has no signup_form".to_string()))?;
    let slug = non_empty(form.signup_form_slug)
        .ok_or_else(|| BsdError::Parse(format!("signup form {} has no slug", form.id)))?;
    Ok(FormRecord {
        id: form.id,
        name: non_empty(form.signup_form_name),
        slug,
    })
}

pub(crate) fn parse_group(body: &str) -> BsdResult<Option<ConstituentGroupRecord>> {
    let response: GroupResponse = from_str(body).map_err(parse_error)?;
    Ok(response.cons_group.map(|group| ConstituentGroupRecord {
        id: group.id,
        name: non_empty(group.name),
        slug: non_empty(group.slug),
        member_count: group.members,
    }))
}
