//! Table of regions reported by the service.

use dioxus::prelude::*;
use redact_core::AppliedRegion;

/// Props for the [`RegionTable`] component.
#[derive(Props, Clone, PartialEq)]
pub struct RegionTableProps {
    regions: Vec<AppliedRegion>,
}

/// One row per region: mask id, bounding box, size, and area.
///
/// Renders nothing for an empty list; the count line already says so.
#[component]
pub fn RegionTable(props: RegionTableProps) -> Element {
    if props.regions.is_empty() {
        return rsx! {};
    }

    rsx! {
        table { class: "regions",
            thead {
                tr {
                    th { "Mask" }
                    th { "Bounding box" }
                    th { "Size" }
                    th { "Area (px)" }
                }
            }
            tbody {
                for region in props.regions.iter() {
                    {render_row(region)}
                }
            }
        }
    }
}

/// Render one table row.
fn render_row(region: &AppliedRegion) -> Element {
    let mask_id = region.mask_id;
    let bbox = region.bbox.to_string();
    let size = format!("{} x {}", region.bbox.width(), region.bbox.height());
    let area = region.area;

    rsx! {
        tr { key: "{mask_id}",
            td { "#{mask_id}" }
            td { "{bbox}" }
            td { "{size}" }
            td { class: "numeric", "{area}" }
        }
    }
}
