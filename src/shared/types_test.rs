//! Test to trigger ts-rs bindings export
//! Run with: cargo test export_bindings

#[cfg(test)]
mod tests {
    use crate::shared::types::*;
    use ts_rs::TS;

    #[test]
    fn export_bindings() {
        // Bindings land in ./bindings (or $TS_RS_EXPORT_DIR).
        // export_all also writes the types each snapshot depends on.
        SessionSnapshot::export_all().expect("Failed to export SessionSnapshot");
        CategoryDTO::export_all().expect("Failed to export CategoryDTO");
    }
}
