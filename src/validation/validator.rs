use indexmap::IndexMap;
use log::{debug, trace};
use regex::Regex;
use serde_json::{Map, Value as JsonValue};

use super::{Diagnostic, Kind, Path};
use crate::{
    instance,
    schema::{AdditionalProperties, Items, RefError, Schema},
    Error,
};

/// Checks JSON instances against one schema.
///
/// Diagnostics accumulate; a failing keyword never aborts the walk, except
/// that a node whose type gate fails is not examined further. The
/// validator is not reentrant; concurrent callers need one instance each.
#[derive(Debug)]
pub struct Validator {
    root: Schema,
    definitions: IndexMap<String, Schema>,
    messages: Vec<Diagnostic>,
}

impl Validator {
    /// Builds a validator for `schema`. A root-level `$ref` is replaced by
    /// its definition before any instance is checked.
    pub fn new(schema: &Schema) -> crate::Result<Self> {
        let definitions = schema.definitions.clone().unwrap_or_default();
        let root = {
            let scope = Scope::new(&definitions);
            scope.resolve(schema)?.clone()
        };

        Ok(Self {
            root,
            definitions,
            messages: Vec::new(),
        })
    }

    /// Parses `instance` and walks it, returning the rendered diagnostics
    /// in emission order. An empty list means the instance is valid.
    pub fn validate(&mut self, instance: &str) -> crate::Result<Vec<String>> {
        let token: JsonValue = serde_json::from_str(instance).map_err(Error::MalformedJson)?;

        let mut scope = Scope::new(&self.definitions);
        scope.validate_token(&token, &self.root, &Path::root())?;

        let messages = scope.finish();
        let rendered = messages.iter().map(ToString::to_string).collect();
        self.messages = messages;
        Ok(rendered)
    }

    /// Diagnostics from the most recent [`validate`](Self::validate) call.
    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }
}

/// One validation scope: a message buffer bound to the document's
/// definitions table. Combinator keywords run nested scopes, so inner
/// diagnostics are observed and discarded rather than leaking into the
/// outer list.
#[derive(Debug)]
struct Scope<'s> {
    definitions: &'s IndexMap<String, Schema>,
    messages: Vec<Diagnostic>,
}

impl<'s> Scope<'s> {
    fn new(definitions: &'s IndexMap<String, Schema>) -> Self {
        Self {
            definitions,
            messages: Vec::new(),
        }
    }

    fn finish(self) -> Vec<Diagnostic> {
        self.messages
    }

    fn report(&mut self, path: &Path, kind: Kind) {
        self.messages.push(Diagnostic {
            path: path.clone(),
            kind,
        });
    }

    /// Swaps a reference node for the definition it points at.
    fn resolve(&self, schema: &'s Schema) -> Result<&'s Schema, RefError> {
        match &schema.reference {
            None => Ok(schema),
            Some(reference) => {
                let name = reference.definition_name()?;
                self.definitions
                    .get(name)
                    .ok_or_else(|| RefError::DefinitionNotFound(name.to_owned()))
            }
        }
    }

    fn validate_token(
        &mut self,
        token: &JsonValue,
        schema: &'s Schema,
        path: &Path,
    ) -> crate::Result<()> {
        trace!("validating {path}");

        if let Some(expected) = &schema.schema_type {
            if !expected.is_empty() {
                let actual = instance::json_type(token);
                if !expected.admits(actual) {
                    self.report(
                        path,
                        Kind::WrongType {
                            expected: expected.clone(),
                            actual,
                        },
                    );
                    // an incompatible token gets no further checks
                    return Ok(());
                }
            }
        }

        match token {
            JsonValue::String(value) => self.check_string(value, schema, path)?,
            JsonValue::Number(_) => self.check_number(token, schema, path),
            JsonValue::Object(members) => self.check_object(members, schema, path)?,
            JsonValue::Array(items) => self.check_array(items, schema, path)?,
            JsonValue::Null | JsonValue::Bool(_) => {}
        }

        self.check_enum(token, schema, path);
        self.check_combinators(token, schema, path)?;

        Ok(())
    }

    fn check_string(&mut self, value: &str, schema: &Schema, path: &Path) -> crate::Result<()> {
        let length = value.chars().count() as u64;

        if let Some(limit) = schema.max_length {
            if length > limit {
                self.report(path, Kind::StringTooLong { limit, length });
            }
        }

        if let Some(limit) = schema.min_length {
            if length < limit {
                self.report(path, Kind::StringTooShort { limit, length });
            }
        }

        if let Some(pattern) = &schema.pattern {
            let re = Regex::new(pattern)?;
            if !re.is_match(value) {
                self.report(
                    path,
                    Kind::StringDoesNotMatchPattern {
                        pattern: pattern.clone(),
                        value: value.to_owned(),
                    },
                );
            }
        }

        Ok(())
    }

    fn check_number(&mut self, token: &JsonValue, schema: &Schema, path: &Path) {
        let Some(value) = token.as_f64() else { return };

        if let Some(limit) = schema.maximum {
            if schema.exclusive_maximum.unwrap_or(false) {
                if value >= limit {
                    self.report(
                        path,
                        Kind::ValueTooLargeExclusive {
                            limit,
                            value: token.clone(),
                        },
                    );
                }
            } else if value > limit {
                self.report(
                    path,
                    Kind::ValueTooLarge {
                        limit,
                        value: token.clone(),
                    },
                );
            }
        }

        if let Some(limit) = schema.minimum {
            if schema.exclusive_minimum.unwrap_or(false) {
                if value <= limit {
                    self.report(
                        path,
                        Kind::ValueTooSmallExclusive {
                            limit,
                            value: token.clone(),
                        },
                    );
                }
            } else if value < limit {
                self.report(
                    path,
                    Kind::ValueTooSmall {
                        limit,
                        value: token.clone(),
                    },
                );
            }
        }

        if let Some(factor) = schema.multiple_of {
            if factor != 0.0 && value % factor != 0.0 {
                self.report(
                    path,
                    Kind::NotAMultiple {
                        factor,
                        value: token.clone(),
                    },
                );
            }
        }
    }

    fn check_object(
        &mut self,
        members: &Map<String, JsonValue>,
        schema: &'s Schema,
        path: &Path,
    ) -> crate::Result<()> {
        let count = members.len();

        if let Some(limit) = schema.max_properties {
            if count as u64 > limit {
                self.report(path, Kind::TooManyProperties { limit, count });
            }
        }

        if let Some(limit) = schema.min_properties {
            if (count as u64) < limit {
                self.report(path, Kind::TooFewProperties { limit, count });
            }
        }

        if let Some(required) = &schema.required {
            for name in required {
                if !members.contains_key(name) {
                    self.report(path, Kind::RequiredPropertyMissing { name: name.clone() });
                }
            }
        }

        let mut additional: Vec<&String> = Vec::new();

        for (name, value) in members {
            match schema.properties.as_ref().and_then(|props| props.get(name)) {
                Some(sub) => {
                    let sub = self.resolve(sub)?;
                    self.validate_token(value, sub, &path.extend(name))?;
                }
                None => additional.push(name),
            }
        }

        if let Some(patterns) = &schema.pattern_properties {
            for (pattern, sub) in patterns {
                let re = Regex::new(pattern)?;
                let sub = self.resolve(sub)?;

                let mut unmatched = Vec::with_capacity(additional.len());
                for name in additional {
                    if re.is_match(name) {
                        self.validate_token(&members[name.as_str()], sub, &path.extend(name))?;
                    } else {
                        unmatched.push(name);
                    }
                }
                additional = unmatched;
            }
        }

        match &schema.additional_properties {
            Some(AdditionalProperties::Allowed(false)) => {
                for name in additional {
                    self.report(
                        &path.extend(name),
                        Kind::AdditionalPropertiesProhibited { name: name.clone() },
                    );
                }
            }
            Some(AdditionalProperties::Schema(sub)) => {
                let sub = self.resolve(sub)?;
                for name in additional {
                    self.validate_token(&members[name.as_str()], sub, &path.extend(name))?;
                }
            }
            Some(AdditionalProperties::Allowed(true)) | None => {}
        }

        Ok(())
    }

    fn check_array(
        &mut self,
        items: &[JsonValue],
        schema: &'s Schema,
        path: &Path,
    ) -> crate::Result<()> {
        let count = items.len();

        if let Some(limit) = schema.min_items {
            if (count as u64) < limit {
                self.report(path, Kind::TooFewArrayItems { limit, count });
            }
        }

        if let Some(limit) = schema.max_items {
            if count as u64 > limit {
                self.report(path, Kind::TooManyArrayItems { limit, count });
            }
        }

        match &schema.items {
            None => {}
            Some(Items::Single(sub)) => {
                let sub = self.resolve(sub)?;
                for (index, item) in items.iter().enumerate() {
                    self.validate_token(item, sub, &path.extend(index.to_string()))?;
                }
            }
            Some(Items::List(schemas)) => {
                if schemas.len() < count {
                    self.report(
                        path,
                        Kind::TooFewItemSchemas {
                            schemas: schemas.len(),
                            count,
                        },
                    );
                } else {
                    for (index, (item, sub)) in items.iter().zip(schemas).enumerate() {
                        let sub = self.resolve(sub)?;
                        self.validate_token(item, sub, &path.extend(index.to_string()))?;
                    }
                }
            }
        }

        if schema.unique_items == Some(true) {
            'search: for (i, item) in items.iter().enumerate() {
                for earlier in &items[..i] {
                    if instance::deep_eq(earlier, item) {
                        self.report(path, Kind::NotUnique { value: item.clone() });
                        break 'search;
                    }
                }
            }
        }

        Ok(())
    }

    fn check_enum(&mut self, token: &JsonValue, schema: &Schema, path: &Path) {
        if let Some(allowed) = &schema.enum_values {
            if !allowed.iter().any(|candidate| instance::deep_eq(candidate, token)) {
                self.report(
                    path,
                    Kind::InvalidEnumValue {
                        value: token.clone(),
                        allowed: allowed.clone(),
                    },
                );
            }
        }
    }

    fn check_combinators(
        &mut self,
        token: &JsonValue,
        schema: &'s Schema,
        path: &Path,
    ) -> crate::Result<()> {
        if let Some(subs) = &schema.all_of {
            let mut inner = Vec::new();
            for sub in subs {
                inner.extend(self.trial(token, sub, path)?);
            }
            if !inner.is_empty() {
                debug!("allOf at {path}: {} inner diagnostics discarded", inner.len());
                self.report(path, Kind::NotAllOf { count: subs.len() });
            }
        }

        if let Some(subs) = &schema.any_of {
            let mut matched = false;
            for sub in subs {
                if self.trial(token, sub, path)?.is_empty() {
                    matched = true;
                    break;
                }
            }
            if !matched {
                self.report(path, Kind::NotAnyOf { count: subs.len() });
            }
        }

        if let Some(subs) = &schema.one_of {
            let mut matched = 0;
            for sub in subs {
                if self.trial(token, sub, path)?.is_empty() {
                    matched += 1;
                }
            }
            if matched != 1 {
                self.report(
                    path,
                    Kind::NotOneOf {
                        matched,
                        count: subs.len(),
                    },
                );
            }
        }

        if let Some(sub) = &schema.not {
            if self.trial(token, sub, path)?.is_empty() {
                self.report(path, Kind::ValidatesAgainstNotSchema);
            }
        }

        Ok(())
    }

    /// Runs `token` against `sub` in a nested scope and hands the inner
    /// diagnostics back without adding them to this scope.
    fn trial(
        &self,
        token: &JsonValue,
        sub: &'s Schema,
        path: &Path,
    ) -> crate::Result<Vec<Diagnostic>> {
        let sub = self.resolve(sub)?;
        let mut scope = Scope::new(self.definitions);
        scope.validate_token(token, sub, path)?;
        Ok(scope.finish())
    }
}
