//! Palette listing

use super::types::{PaletteInfo, PalettesResponse};
use crate::palette::{DEFAULT_PALETTE, PALETTES};
use axum::response::Json;

/// List the color palettes accepted by `/analyze`
#[utoipa::path(
    get,
    path = "/api/palettes",
    tag = "Palettes",
    summary = "List palettes",
    description = "Every named palette with its six colors, default first",
    responses(
        (status = 200, description = "Available palettes", body = PalettesResponse)
    )
)]
pub async fn list_palettes() -> Json<PalettesResponse> {
    Json(PalettesResponse {
        default: DEFAULT_PALETTE.to_string(),
        palettes: PALETTES
            .iter()
            .map(|palette| PaletteInfo {
                name: palette.name().to_string(),
                colors: palette.colors().iter().map(|c| c.to_string()).collect(),
            })
            .collect(),
    })
}
