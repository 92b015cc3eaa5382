fn main() -> Result<(), mask_editor::ExportError> {
    mask_editor::run_native()
}
