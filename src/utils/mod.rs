pub mod form;
pub mod layout;
pub mod list_navigation;
pub mod path;
pub mod profile_validation;
pub mod text_input;

pub use form::{Form, FormField};
pub use layout::{center_popup, centered_column, create_standard_layout};
pub use list_navigation::ListStateExt;
pub use path::{expand_path, format_path_for_display, get_config_dir, get_config_path, get_home_dir, get_log_dir};
pub use profile_validation::{validate_profile, validate_sign_in, ProfileFormData, ValidationErrors};
pub use text_input::TextInput;
