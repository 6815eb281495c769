use super::PageContext;
use crate::collection::{LoadState, RemoteCollection};
use crate::error::PortalError;
use crate::presentation::{Tone, progress_width, skill_gap_tone};
use hrportal_rs_protocol::{AnalyticsRange, CareerAnalytics, OnboardingAnalytics, SkillAssessment};
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;

/// A skill prepared for rendering as a pair of progress bars.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRow {
    pub name: String,
    pub category: Option<String>,
    pub current_width: u8,
    pub target_width: u8,
    pub gap: f64,
    pub tone: Tone,
}

impl From<&SkillAssessment> for SkillRow {
    fn from(skill: &SkillAssessment) -> Self {
        Self {
            name: skill.name.clone(),
            category: skill.category.clone(),
            current_width: progress_width(skill.current),
            target_width: progress_width(skill.target),
            gap: skill.gap(),
            tone: skill_gap_tone(skill),
        }
    }
}

#[derive(Default)]
struct CareerState {
    analytics: Option<CareerAnalytics>,
    analytics_state: LoadState,
    skills: RemoteCollection<SkillAssessment>,
}

/// Career analytics and the employee's skills assessment.
#[derive(Clone)]
pub struct CareerDashboard {
    ctx: PageContext,
    state: Arc<Mutex<CareerState>>,
}

impl CareerDashboard {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            state: Arc::new(Mutex::new(CareerState::default())),
        }
    }

    /// Load skills for everyone and organisation analytics for Admin/HR.
    ///
    /// The two reads are independent; one failing does not clear the other.
    pub async fn refresh(&self) {
        let ticket = self.state.lock().skills.begin_fetch();
        let include_analytics = self.ctx.user.as_ref().is_some_and(|user| user.is_privileged());
        if include_analytics {
            self.state.lock().analytics_state = LoadState::Loading;
        }

        let (skills, analytics) = if include_analytics {
            let (skills, analytics) = tokio::join!(
                self.ctx.api.skills_assessment(),
                self.ctx.api.career_analytics()
            );
            (skills, Some(analytics))
        } else {
            (self.ctx.api.skills_assessment().await, None)
        };

        let mut state = self.state.lock();
        match skills {
            Ok(items) => {
                state.skills.apply(ticket, items);
            }
            Err(err) => {
                warn!("failed to load skills assessment (error={})", err);
                state.skills.fail(ticket, err.user_message());
            }
        }
        match analytics {
            Some(Ok(analytics)) => {
                state.analytics = Some(analytics);
                state.analytics_state = LoadState::Loaded;
            }
            Some(Err(err)) => {
                warn!("failed to load career analytics (error={})", err);
                state.analytics_state = LoadState::Failed(err.user_message());
            }
            None => {}
        }
    }

    pub fn skills_state(&self) -> LoadState {
        self.state.lock().skills.state().clone()
    }

    pub fn analytics_state(&self) -> LoadState {
        self.state.lock().analytics_state.clone()
    }

    pub fn analytics(&self) -> Option<CareerAnalytics> {
        self.state.lock().analytics.clone()
    }

    /// Skill rows with the largest gap first; ties keep backend order.
    pub fn skill_rows(&self) -> Vec<SkillRow> {
        let mut rows: Vec<SkillRow> = self
            .state
            .lock()
            .skills
            .items()
            .iter()
            .map(SkillRow::from)
            .collect();
        rows.sort_by(|a, b| b.gap.total_cmp(&a.gap));
        rows
    }

    pub async fn onboarding_analytics(
        &self,
        range: AnalyticsRange,
    ) -> Result<OnboardingAnalytics, PortalError> {
        self.ctx.require_privileged("viewing onboarding analytics")?;
        self.ctx.api.onboarding_analytics(range).await
    }
}
