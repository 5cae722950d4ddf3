use crate::domain::model::{Record, RecordSet};
use crate::utils::error::Result;
use crate::utils::validation::{validate_choice, validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};

pub const GENDERS: &[&str] = &["Male", "Female"];
pub const AGE_GROUPS: &[&str] = &["18-24", "25-34", "35-44", "45+"];
pub const PLATFORMS: &[&str] = &["Facebook", "Instagram", "Google"];
pub const AD_TYPES: &[&str] = &["Video", "Image", "Story"];
pub const TIMES_OF_DAY: &[&str] = &["Morning", "Afternoon", "Evening", "Night"];

pub const DURATION_DAYS_RANGE: (u32, u32) = (1, 60);
pub const TOTAL_BUDGET_RANGE: (u64, u64) = (100, 100_000);

/// 手動輸入表單，欄位順序即為產生記錄的欄位順序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct CampaignForm {
    #[cfg_attr(feature = "cli", arg(long, default_value = "Male"))]
    pub target_gender: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "18-24"))]
    pub target_age_group: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "Fashion"))]
    pub target_interests: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "10"))]
    pub duration_days: u32,

    #[cfg_attr(feature = "cli", arg(long, default_value = "5000"))]
    pub total_budget: u64,

    #[cfg_attr(feature = "cli", arg(long, default_value = "Facebook"))]
    pub ad_platform: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "Video"))]
    pub ad_type: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "Morning"))]
    pub time_of_day: String,
}

impl Default for CampaignForm {
    fn default() -> Self {
        Self {
            target_gender: "Male".to_string(),
            target_age_group: "18-24".to_string(),
            target_interests: "Fashion".to_string(),
            duration_days: 10,
            total_budget: 5000,
            ad_platform: "Facebook".to_string(),
            ad_type: "Video".to_string(),
            time_of_day: "Morning".to_string(),
        }
    }
}

impl CampaignForm {
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("target_gender", self.target_gender.as_str())
            .with("target_age_group", self.target_age_group.as_str())
            .with("target_interests", self.target_interests.as_str())
            .with("duration_days", self.duration_days)
            .with("total_budget", self.total_budget)
            .with("ad_platform", self.ad_platform.as_str())
            .with("ad_type", self.ad_type.as_str())
            .with("time_of_day", self.time_of_day.as_str())
    }

    pub fn to_record_set(&self) -> RecordSet {
        RecordSet::single(self.to_record())
    }
}

impl Validate for CampaignForm {
    fn validate(&self) -> Result<()> {
        validate_choice("target_gender", &self.target_gender, GENDERS)?;
        validate_choice("target_age_group", &self.target_age_group, AGE_GROUPS)?;
        validate_non_empty_string("target_interests", &self.target_interests)?;
        validate_range(
            "duration_days",
            self.duration_days,
            DURATION_DAYS_RANGE.0,
            DURATION_DAYS_RANGE.1,
        )?;
        validate_range(
            "total_budget",
            self.total_budget,
            TOTAL_BUDGET_RANGE.0,
            TOTAL_BUDGET_RANGE.1,
        )?;
        validate_choice("ad_platform", &self.ad_platform, PLATFORMS)?;
        validate_choice("ad_type", &self.ad_type, AD_TYPES)?;
        validate_choice("time_of_day", &self.time_of_day, TIMES_OF_DAY)?;
        Ok(())
    }
}
