// Reusable UI widgets

pub mod date_picker;
pub mod dialog;
pub mod toast;

pub use date_picker::{DatePicker, DatePickerState};
pub use dialog::{Alert, Dialog, DialogVariant};
pub use toast::{Toast, ToastManager, ToastVariant};
