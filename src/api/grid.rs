/// Grid optimization advice
///
/// For grid layouts the service can say which photo count would tile the
/// canvas into a perfect rows x columns arrangement. The response offers up
/// to three signals; `interpret` collapses them into a single non-binding
/// recommendation for the UI.

use serde::{Deserialize, Serialize};

/// Request body for the grid-optimization endpoint (JSON, not multipart)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridOptimizeRequest {
    pub num_images: u32,
    pub width_mm: f64,
    pub height_mm: f64,
    pub dpi: u32,
    pub spacing: f64,
}

/// The grid the current photo count already produces
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentGrid {
    pub columns: u32,
    pub rows: u32,
    #[serde(default)]
    pub is_perfect: bool,
}

/// The service's preferred "closest perfect grid" recommendation
#[derive(Debug, Clone, Deserialize)]
pub struct PerfectGridSuggestion {
    pub columns: u32,
    pub rows: u32,
    pub optimal_num_images: u32,
    #[serde(default)]
    pub images_needed: u32,
    #[serde(default)]
    pub images_to_remove: u32,
}

/// One entry of the add/remove suggestion lists
#[derive(Debug, Clone, Deserialize)]
pub struct GridCandidate {
    pub columns: u32,
    pub rows: u32,
    pub num_images: u32,
}

/// Full response of the grid-optimization endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridOptimizeResponse {
    #[serde(default)]
    pub current_grid: Option<CurrentGrid>,
    #[serde(default)]
    pub closest_perfect_grid: Option<PerfectGridSuggestion>,
    #[serde(default)]
    pub add_suggestions: Vec<GridCandidate>,
    #[serde(default)]
    pub remove_suggestions: Vec<GridCandidate>,
}

/// What the UI shows: the recommended arrangement and how many photos to
/// add (positive) or remove (negative) to reach it. `delta == None` means
/// the service could not tell whether the current count is perfect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAdvice {
    pub columns: u32,
    pub rows: u32,
    pub optimal_num_images: u32,
    pub delta: Option<i64>,
}

/// Collapse a grid-optimization response into one recommendation.
///
/// Priority: the explicit closest-perfect-grid recommendation, then the
/// smallest-|delta| entry across the add/remove lists (add wins ties),
/// then the reported current grid.
pub fn interpret(response: &GridOptimizeResponse, num_images: usize) -> Option<GridAdvice> {
    let current = num_images as i64;

    if let Some(perfect) = &response.closest_perfect_grid {
        let delta = if perfect.images_needed > 0 {
            i64::from(perfect.images_needed)
        } else if perfect.images_to_remove > 0 {
            -i64::from(perfect.images_to_remove)
        } else {
            0
        };
        return Some(GridAdvice {
            columns: perfect.columns,
            rows: perfect.rows,
            optimal_num_images: perfect.optimal_num_images,
            delta: Some(delta),
        });
    }

    let best_candidate = response
        .add_suggestions
        .iter()
        .chain(response.remove_suggestions.iter())
        .map(|candidate| {
            let delta = i64::from(candidate.num_images) - current;
            (delta.abs(), candidate, delta)
        })
        .min_by_key(|(distance, _, delta)| (*distance, delta.is_negative()));
    if let Some((_, candidate, delta)) = best_candidate {
        return Some(GridAdvice {
            columns: candidate.columns,
            rows: candidate.rows,
            optimal_num_images: candidate.num_images,
            delta: Some(delta),
        });
    }

    response.current_grid.as_ref().map(|grid| GridAdvice {
        columns: grid.columns,
        rows: grid.rows,
        optimal_num_images: num_images as u32,
        delta: if grid.is_perfect { Some(0) } else { None },
    })
}
