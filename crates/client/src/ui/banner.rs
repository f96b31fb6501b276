use std::time::{Duration, Instant};

/// How long a banner stays on screen.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

pub const CREATED: &str = "Funcionário salvo com sucesso!";
pub const UPDATED: &str = "Funcionário atualizado com sucesso!";
pub const DELETED: &str = "Funcionário deletado com sucesso!";
pub const FAILED: &str = "Erro! Tente novamente";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: &'static str,
    pub shown_at: Instant,
}

impl Banner {
    pub fn success(text: &'static str, at: Instant) -> Self {
        Self { kind: BannerKind::Success, text, shown_at: at }
    }

    pub fn error(at: Instant) -> Self {
        Self { kind: BannerKind::Error, text: FAILED, shown_at: at }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= BANNER_TTL
    }
}
