// src/application/forms/bookmark_form.rs
//! Input boundary for creating and editing bookmarks.
//!
//! Only structural checks happen here: required fields, URL syntax and
//! length limits. Title and description may stay empty; filling them from
//! website metadata is the service's job.
use crate::domain::bookmark::{Bookmark, BookmarkBuilder};
use crate::domain::error::DomainResult;
use crate::domain::owner::OwnerId;
use crate::domain::tag_string::parse_tag_string;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;
use tracing::{debug, instrument};
use url::{Host, ParseError, Url};

pub const TITLE_MAX_LENGTH: usize = 512;
pub const URL_MAX_LENGTH: usize = 2048;
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];
const DEFAULT_SCHEME_PREFIX: &str = "http://";
const AUTHORITY_SLASHES: [char; 2] = ['/', '\\'];

/// Raw form input. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkForm {
    pub url: String,
    pub tag_string: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Url,
    TagString,
    Title,
    Description,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            FormField::Url => "url",
            FormField::TagString => "tag_string",
            FormField::Title => "title",
            FormField::Description => "description",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Enter a valid URL.")]
    InvalidUrl,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error("A bookmark with this URL already exists.")]
    DuplicateUrl,
}

/// Field-level validation errors of a rejected form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, Vec<FieldError>>,
}

impl FormErrors {
    pub fn add(&mut self, field: FormField, error: FieldError) {
        self.errors.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: FormField) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_error(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.errors
            .iter()
            .flat_map(|(field, errors)| errors.iter().map(move |e| (*field, e)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Validated, cleaned form data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub url: String,
    pub tag_string: String,
    pub title: String,
    pub description: String,
}

impl BookmarkDraft {
    pub fn tag_names(&self) -> Vec<String> {
        parse_tag_string(&self.tag_string)
    }

    /// Unsaved bookmark without tags or website metadata
    pub fn into_bookmark(self, owner: OwnerId) -> DomainResult<Bookmark> {
        let bookmark = BookmarkBuilder::default()
            .url(self.url)
            .title(self.title)
            .description(self.description)
            .owner(owner)
            .build()?;
        Ok(bookmark)
    }
}

impl BookmarkForm {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Check the input and return the cleaned values or every field error found
    #[instrument(skip(self), level = "debug", fields(url = %self.url))]
    pub fn validate(&self) -> Result<BookmarkDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let url = clean_url(&self.url).unwrap_or_else(|e| {
            errors.add(FormField::Url, e);
            String::new()
        });

        let title = self.title.trim().to_string();
        let title_length = title.chars().count();
        if title_length > TITLE_MAX_LENGTH {
            errors.add(
                FormField::Title,
                FieldError::TooLong {
                    max: TITLE_MAX_LENGTH,
                    actual: title_length,
                },
            );
        }

        if !errors.is_empty() {
            debug!("Rejected bookmark form: {}", errors);
            return Err(errors);
        }

        Ok(BookmarkDraft {
            url,
            tag_string: self.tag_string.trim().to_string(),
            title,
            description: self.description.trim().to_string(),
        })
    }
}

/// Trim, default a missing scheme to http and check the URL syntax
fn clean_url(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    let value = normalize_url(value);

    let length = value.chars().count();
    if length > URL_MAX_LENGTH {
        return Err(FieldError::TooLong {
            max: URL_MAX_LENGTH,
            actual: length,
        });
    }

    if is_valid_url(&value) {
        Ok(value)
    } else {
        Err(FieldError::InvalidUrl)
    }
}

/// Rewrite the input to `scheme://authority...` form.
///
/// A missing scheme becomes http. For the web schemes the parser tolerates
/// missing or extra slashes (`http:example.com`, `http:////example.com`);
/// those are rebuilt so the stored URL names its host directly.
fn normalize_url(value: &str) -> String {
    match Url::parse(value) {
        Err(ParseError::RelativeUrlWithoutBase) => format!(
            "{}{}",
            DEFAULT_SCHEME_PREFIX,
            value.trim_start_matches(AUTHORITY_SLASHES)
        ),
        Ok(parsed) if ALLOWED_SCHEMES.contains(&parsed.scheme()) => {
            match value.split_once(':') {
                Some((scheme, rest)) if scheme.eq_ignore_ascii_case(parsed.scheme()) => format!(
                    "{}://{}",
                    parsed.scheme(),
                    rest.trim_start_matches(AUTHORITY_SLASHES)
                ),
                _ => value.to_string(),
            }
        }
        _ => value.to_string(),
    }
}

fn is_valid_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(parsed) = Url::parse(value) else {
        return false;
    };
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }
    match parsed.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        // the parser also reads `2130706433` or `1.2.3` as IPv4
        Some(Host::Ipv4(_)) => raw_host(value).parse::<Ipv4Addr>().is_ok(),
        Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Host text as typed, without userinfo or port
fn raw_host(value: &str) -> &str {
    let authority = value
        .split_once("://")
        .map_or("", |(_, rest)| rest)
        .split(['/', '?', '#', '\\'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host.split(':').next().unwrap_or_default()
}

/// `localhost` or a dotted name whose last label looks like a TLD
fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain == "localhost" {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let label_ok = |label: &&str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    if !labels.iter().all(label_ok) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
}
