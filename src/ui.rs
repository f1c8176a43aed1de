use chrono::NaiveDateTime;

/// Application screens and the parameters each one is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Dashboard,
    CreateAppointment { provider_id: String },
    AppointmentCreated { date: NaiveDateTime, provider_name: String },
    Profile,
}

impl Route {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Route::SignIn => "sign-in",
            Route::Dashboard => "dashboard",
            Route::CreateAppointment { .. } => "create-appointment",
            Route::AppointmentCreated { .. } => "appointment-created",
            Route::Profile => "profile",
        }
    }

    /// Routes that need a signed-in user.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::SignIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sign_in_is_public() {
        assert!(!Route::SignIn.requires_session());
        assert!(Route::Dashboard.requires_session());
        assert!(Route::CreateAppointment {
            provider_id: "p1".into()
        }
        .requires_session());
    }
}
