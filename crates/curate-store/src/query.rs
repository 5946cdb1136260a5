// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal interpreter for the small, fixed vocabulary of query templates
//! this codebase issues against `DocumentStore::query` (equality filters,
//! `NOT IS_DEFINED`, `ARRAY_CONTAINS`, `ORDER BY ... DESC/ASC`, `TOP`).
//!
//! [`CosmosStore`](crate::cosmos::CosmosStore) hands templates straight to
//! the Cosmos DB query engine unmodified; this interpreter exists so
//! [`InMemoryStore`](crate::in_memory::InMemoryStore) can honor the same
//! templates in tests without embedding a real SQL engine.

use crate::store::QueryParam;
use crate::StoreError;
use serde_json::Value as Json;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct ParsedQuery {
    pub predicate_clauses: Vec<String>,
    pub order_by: Option<(String, bool)>, // (field, descending)
    pub top: Option<TopLimit>,
}

#[derive(Debug)]
pub(crate) enum TopLimit {
    Literal(usize),
    Param(String),
}

pub(crate) fn parse(template: &str) -> Result<ParsedQuery, StoreError> {
    let mut parsed = ParsedQuery::default();

    let upper = template.to_ascii_uppercase();
    if let Some(top_idx) = upper.find("TOP ") {
        let rest = &template[top_idx + 4..];
        let token = rest.split_whitespace().next().ok_or_else(|| {
            StoreError::MalformedQuery(format!("TOP with no argument: {template}"))
        })?;
        parsed.top = Some(if let Some(param) = token.strip_prefix('@') {
            TopLimit::Param(format!("@{param}"))
        } else {
            TopLimit::Literal(token.parse().map_err(|_| {
                StoreError::MalformedQuery(format!("TOP argument not numeric: {token}"))
            })?)
        });
    }

    if let Some(where_idx) = upper.find("WHERE ") {
        let after_where = &template[where_idx + 6..];
        let order_idx = upper[where_idx..].find(" ORDER BY ");
        let clause_text = match order_idx {
            Some(rel) => &after_where[..rel - 6],
            None => after_where,
        };
        parsed.predicate_clauses = split_top_level_and(clause_text)
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(order_idx) = upper.find(" ORDER BY ") {
        let rest = template[order_idx + 10..].trim();
        let desc = rest.to_ascii_uppercase().ends_with("DESC");
        let field = rest
            .trim_end_matches("DESC")
            .trim_end_matches("desc")
            .trim_end_matches("ASC")
            .trim_end_matches("asc")
            .trim()
            .trim_start_matches("c.")
            .trim()
            .to_string();
        parsed.order_by = Some((field, desc));
    }

    Ok(parsed)
}

/// Split a WHERE clause body on top-level " AND " — safe here because our
/// templates' parenthesized function calls never themselves contain " AND ".
fn split_top_level_and(text: &str) -> Vec<&str> {
    text.split(" AND ").collect()
}

pub(crate) fn matches_all(
    doc: &Json,
    clauses: &[String],
    params: &HashMap<&str, &Json>,
) -> Result<bool, StoreError> {
    for clause in clauses {
        if !matches_one(doc, clause, params)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_one(doc: &Json, clause: &str, params: &HashMap<&str, &Json>) -> Result<bool, StoreError> {
    let clause = clause.trim();

    if let Some(inner) = strip_call(clause, "NOT IS_DEFINED(") {
        let field = inner.trim_start_matches("c.").trim();
        return Ok(doc.get(field).is_none() || doc.get(field) == Some(&Json::Null));
    }

    if let Some(inner) = strip_call(clause, "ARRAY_CONTAINS(") {
        let mut parts = inner.splitn(2, ',');
        let param_name = parts
            .next()
            .ok_or_else(|| StoreError::MalformedQuery(clause.to_string()))?
            .trim();
        let field = parts
            .next()
            .ok_or_else(|| StoreError::MalformedQuery(clause.to_string()))?
            .trim()
            .trim_start_matches("c.")
            .trim();
        let array = params
            .get(param_name)
            .ok_or_else(|| StoreError::MalformedQuery(format!("unbound param {param_name}")))?;
        let value = doc.get(field).cloned().unwrap_or(Json::Null);
        return Ok(array
            .as_array()
            .map(|items| items.contains(&value))
            .unwrap_or(false));
    }

    // Fallback: `c.field = @param`
    if let Some((lhs, rhs)) = clause.split_once('=') {
        let field = lhs.trim().trim_start_matches("c.").trim();
        let param_name = rhs.trim();
        let expected = params
            .get(param_name)
            .ok_or_else(|| StoreError::MalformedQuery(format!("unbound param {param_name}")))?;
        let actual = doc.get(field).cloned().unwrap_or(Json::Null);
        return Ok(&actual == *expected);
    }

    Err(StoreError::MalformedQuery(clause.to_string()))
}

fn strip_call<'a>(clause: &'a str, prefix: &str) -> Option<&'a str> {
    clause
        .strip_prefix(prefix)
        .and_then(|s| s.strip_suffix(')'))
}

pub(crate) fn index_params<'a>(params: &'a [QueryParam<'a>]) -> HashMap<&'a str, &'a Json> {
    params.iter().map(|(name, value)| (*name, value)).collect()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
