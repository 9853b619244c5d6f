use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Open/closed state of a position, derived from the sheet's free-text
/// "¿Posicion abierta?" column. Only an explicit "no" closes a position;
/// blank or unrecognized text keeps it in the open pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenState {
    Open,
    Closed,
    Unknown,
}

impl OpenState {
    pub fn from_raw(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "no" => Self::Closed,
            "si" | "sí" | "yes" => Self::Open,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }

    /// A position counts as open unless its latest row says "no".
    pub const fn counts_as_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Numeric columns tracked per event row. Each variant maps to one exact
/// (trimmed) header in the sheet export; absent headers resolve to zero for
/// every row at normalization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterColumn {
    NewCandidates,
    IndeedCandidates,
    DirectSearch,
    CrmCandidates,
    Assigned,
    ViableCandidates,
    CvMust,
    CvHardSkills,
    CvSoftSkills,
    ScreenOutHardSkills,
    ScreenOutSoftSkills,
    ScreenOutBudget,
    ScreenOutEnglish,
    ScreenOutNoShow,
    ScreenOutLocation,
    ClientOutChemistry,
    ClientOutExpertise,
    ClientOutProfile,
    ClientOutEnglish,
    ClientOutOverqualified,
    Hired,
    TernaSubmitted,
}

impl CounterColumn {
    pub const fn ordered() -> [Self; 22] {
        [
            Self::NewCandidates,
            Self::IndeedCandidates,
            Self::DirectSearch,
            Self::CrmCandidates,
            Self::Assigned,
            Self::ViableCandidates,
            Self::CvMust,
            Self::CvHardSkills,
            Self::CvSoftSkills,
            Self::ScreenOutHardSkills,
            Self::ScreenOutSoftSkills,
            Self::ScreenOutBudget,
            Self::ScreenOutEnglish,
            Self::ScreenOutNoShow,
            Self::ScreenOutLocation,
            Self::ClientOutChemistry,
            Self::ClientOutExpertise,
            Self::ClientOutProfile,
            Self::ClientOutEnglish,
            Self::ClientOutOverqualified,
            Self::Hired,
            Self::TernaSubmitted,
        ]
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::NewCandidates => "Recruitment. Candidatos nuevos",
            Self::IndeedCandidates => "Recruitment. Candidatos Indeed",
            Self::DirectSearch => "Recruitment. Busqueda directa",
            Self::CrmCandidates => "Recruitment. Candidatos R.CRM",
            Self::Assigned => "Recruitment. Assigned",
            Self::ViableCandidates => "Recruitment. Candidatos Viables",
            Self::CvMust => "Screening. CV. MUST",
            Self::CvHardSkills => "Screening. CV. H.Skills",
            Self::CvSoftSkills => "Screening. CV. S.Skills",
            Self::ScreenOutHardSkills => "Screening. CNV. Perfil no calificado (hard skills)",
            Self::ScreenOutSoftSkills => "Screening. CNV. Soft Skills",
            Self::ScreenOutBudget => "Screening. CNV. Fuera de presupuesto",
            Self::ScreenOutEnglish => "Screening. CNV. Nivel de ingles",
            Self::ScreenOutNoShow => "Screening. CNV. No se presento / Inpuntual",
            Self::ScreenOutLocation => "Screening. CNV. Localidad",
            Self::ClientOutChemistry => "S. Cliente. Quimica personal",
            Self::ClientOutExpertise => "S. Cliente. Inconsistencias en expertise",
            Self::ClientOutProfile => "S. Cliente. No cumple con el perfil",
            Self::ClientOutEnglish => "S. Cliente. Nivel de ingles",
            Self::ClientOutOverqualified => "S. Cliente. Sobrecalificado",
            Self::Hired => "Candidatos contratados",
            Self::TernaSubmitted => "Terna. Candidatos enviados",
        }
    }
}

/// Counter values for one row, resolved once at normalization time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub new_candidates: u32,
    pub indeed_candidates: u32,
    pub direct_search: u32,
    pub crm_candidates: u32,
    pub assigned: u32,
    pub viable_candidates: u32,
    pub cv_must: u32,
    pub cv_hard_skills: u32,
    pub cv_soft_skills: u32,
    pub screen_out_hard_skills: u32,
    pub screen_out_soft_skills: u32,
    pub screen_out_budget: u32,
    pub screen_out_english: u32,
    pub screen_out_no_show: u32,
    pub screen_out_location: u32,
    pub client_out_chemistry: u32,
    pub client_out_expertise: u32,
    pub client_out_profile: u32,
    pub client_out_english: u32,
    pub client_out_overqualified: u32,
    pub hired: u32,
    pub terna_submitted: u32,
}

impl Counters {
    pub const fn get(&self, column: CounterColumn) -> u32 {
        match column {
            CounterColumn::NewCandidates => self.new_candidates,
            CounterColumn::IndeedCandidates => self.indeed_candidates,
            CounterColumn::DirectSearch => self.direct_search,
            CounterColumn::CrmCandidates => self.crm_candidates,
            CounterColumn::Assigned => self.assigned,
            CounterColumn::ViableCandidates => self.viable_candidates,
            CounterColumn::CvMust => self.cv_must,
            CounterColumn::CvHardSkills => self.cv_hard_skills,
            CounterColumn::CvSoftSkills => self.cv_soft_skills,
            CounterColumn::ScreenOutHardSkills => self.screen_out_hard_skills,
            CounterColumn::ScreenOutSoftSkills => self.screen_out_soft_skills,
            CounterColumn::ScreenOutBudget => self.screen_out_budget,
            CounterColumn::ScreenOutEnglish => self.screen_out_english,
            CounterColumn::ScreenOutNoShow => self.screen_out_no_show,
            CounterColumn::ScreenOutLocation => self.screen_out_location,
            CounterColumn::ClientOutChemistry => self.client_out_chemistry,
            CounterColumn::ClientOutExpertise => self.client_out_expertise,
            CounterColumn::ClientOutProfile => self.client_out_profile,
            CounterColumn::ClientOutEnglish => self.client_out_english,
            CounterColumn::ClientOutOverqualified => self.client_out_overqualified,
            CounterColumn::Hired => self.hired,
            CounterColumn::TernaSubmitted => self.terna_submitted,
        }
    }

    pub fn set(&mut self, column: CounterColumn, value: u32) {
        match column {
            CounterColumn::NewCandidates => self.new_candidates = value,
            CounterColumn::IndeedCandidates => self.indeed_candidates = value,
            CounterColumn::DirectSearch => self.direct_search = value,
            CounterColumn::CrmCandidates => self.crm_candidates = value,
            CounterColumn::Assigned => self.assigned = value,
            CounterColumn::ViableCandidates => self.viable_candidates = value,
            CounterColumn::CvMust => self.cv_must = value,
            CounterColumn::CvHardSkills => self.cv_hard_skills = value,
            CounterColumn::CvSoftSkills => self.cv_soft_skills = value,
            CounterColumn::ScreenOutHardSkills => self.screen_out_hard_skills = value,
            CounterColumn::ScreenOutSoftSkills => self.screen_out_soft_skills = value,
            CounterColumn::ScreenOutBudget => self.screen_out_budget = value,
            CounterColumn::ScreenOutEnglish => self.screen_out_english = value,
            CounterColumn::ScreenOutNoShow => self.screen_out_no_show = value,
            CounterColumn::ScreenOutLocation => self.screen_out_location = value,
            CounterColumn::ClientOutChemistry => self.client_out_chemistry = value,
            CounterColumn::ClientOutExpertise => self.client_out_expertise = value,
            CounterColumn::ClientOutProfile => self.client_out_profile = value,
            CounterColumn::ClientOutEnglish => self.client_out_english = value,
            CounterColumn::ClientOutOverqualified => self.client_out_overqualified = value,
            CounterColumn::Hired => self.hired = value,
            CounterColumn::TernaSubmitted => self.terna_submitted = value,
        }
    }
}

/// One observation for one position on one date. Immutable once normalized;
/// every aggregate reads rows and produces new derived values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub date: NaiveDate,
    pub position: String,
    pub recruiter: String,
    pub open_state: OpenState,
    pub counters: Counters,
}

#[derive(Debug)]
pub enum ReportError {
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    IncompleteDateRange,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::InvalidDateRange { start, end } => {
                write!(f, "invalid date range: {start} is after {end}")
            }
            ReportError::IncompleteDateRange => {
                write!(f, "incomplete date range: provide both start and end")
            }
        }
    }
}

impl std::error::Error for ReportError {}
