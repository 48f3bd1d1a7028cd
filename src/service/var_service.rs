use crate::catalog::scope::Scope;
use crate::prelude::*;
use anyhow::anyhow;
use std::env::var;

pub async fn get_data_dir() -> Result<String> {
    match var("DATA_DIR") {
        Ok(dir) => match dir.is_empty() {
            true => {
                let err = "DATA_DIR is empty";
                tracing::error!(err);
                Err(anyhow!(err))
            }
            false => Ok(dir),
        },
        Err(_) => Ok(String::from(".")),
    }
}

pub async fn get_map_scope() -> Result<Scope> {
    match var("MAP_SCOPE") {
        Ok(value) => match Scope::parse(&value) {
            Some(scope) => Ok(scope),
            None => {
                let err = format!("Unrecognized MAP_SCOPE: {}", value);
                tracing::error!(err);
                Err(anyhow!(err))
            }
        },
        Err(_) => Ok(Scope::World),
    }
}

/// Comma-separated visited-region edit for this render. Unset means no edit;
/// set but empty means the user deselected everything.
pub async fn get_selection_edit() -> Result<Option<Vec<String>>> {
    match var("VISITED_EDIT") {
        Ok(edit) => match edit.is_empty() {
            true => Ok(Some(Vec::new())),
            false => Ok(Some(
                edit.split(',')
                    .map(|region| region.trim().to_string())
                    .filter(|region| !region.is_empty())
                    .collect(),
            )),
        },
        Err(_) => Ok(None),
    }
}
