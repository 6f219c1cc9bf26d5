/// User decisions that shape an install run.
///
/// Captured once from the wizard or from re-exec arguments and never
/// mutated while a plan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstallFlags {
    /// Keep `chrome/sine-mods` when reinstalling.
    pub save_data: bool,
    /// Run the uninstall plan instead of the install plan.
    pub uninstall: bool,
    /// (Re)install the bootloader into the browser directory.
    pub reinstall_boot: bool,
    /// Show the completion screen and wait for the browser to close. Cleared
    /// by `--update`, which also exits as soon as the plan finishes.
    pub show_exit_screen: bool,
}

impl Default for InstallFlags {
    fn default() -> Self {
        Self {
            save_data: false,
            uninstall: false,
            reinstall_boot: true,
            show_exit_screen: true,
        }
    }
}
