//! Small helpers shared by the report pages: grouping, debounce, file names.

use contracts::reports::relatorio::Periodo;
use gloo_timers::callback::Timeout;
use std::collections::HashMap;
use std::hash::Hash;

/// Groups items by key, keeping groups in order of first appearance
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }
    groups
}

/// Runs only the last of a burst of calls, `delay_ms` after it was made.
///
/// Holds a browser timer, so it must live in local (non-`Send`) storage.
pub struct Debouncer {
    delay_ms: u32,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn call(&mut self, f: impl FnOnce() + 'static) {
        // dropping a gloo Timeout clears it
        self.pending = Some(Timeout::new(self.delay_ms, f));
    }

    pub fn cancel(&mut self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }
}

/// Keeps `[A-Za-z0-9_-]`, maps everything else to `_`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Download name built from the report's year range, e.g.
/// `balanco_receita_2023_2024.png`.
///
/// Without a period (report not generated yet) the fallback year is used alone.
pub fn export_filename(prefix: &str, periodo: Option<&Periodo>, fallback_ano: i32, ext: &str) -> String {
    let range = match periodo {
        Some(p) => format!("{}_{}", p.ano_inicial(), p.ano),
        None => fallback_ano.to_string(),
    };
    format!("{}_{}.{}", sanitize_filename(prefix), range, ext)
}
