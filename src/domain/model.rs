use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed sales tax applied to every bill.
pub const TAX_RATE: f64 = 0.06;

/// Belt levels, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    White,
    Yellow,
    Green,
    Blue,
    Purple,
    Brown,
    Black,
}

impl Rank {
    pub const ALL: [Rank; 7] = [
        Rank::White,
        Rank::Yellow,
        Rank::Green,
        Rank::Blue,
        Rank::Purple,
        Rank::Brown,
        Rank::Black,
    ];

    /// Unknown codes fall back to `White` instead of failing.
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::White => "White",
            Rank::Yellow => "Yellow",
            Rank::Green => "Green",
            Rank::Blue => "Blue",
            Rank::Purple => "Purple",
            Rank::Brown => "Brown",
            Rank::Black => "Black",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display text for a raw rank code.
pub fn rank_name(code: i64) -> &'static str {
    Rank::from_code(code).name()
}

/// Returns whichever of the two values is greater, preferring `b` on ties.
pub fn larger<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

fn non_negative(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Negative enrollment is recorded as zero months.
pub fn months_from_raw(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillingPolicy {
    base_rate: f64,
    add_on: f64,
}

impl BillingPolicy {
    pub fn new(base_rate: f64, add_on: f64) -> Self {
        Self {
            base_rate: non_negative(base_rate),
            add_on: non_negative(add_on),
        }
    }

    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    pub fn add_on(&self) -> f64 {
        self.add_on
    }

    pub fn total(&self) -> f64 {
        (self.base_rate + self.add_on) * (1.0 + TAX_RATE)
    }
}

/// Rates charged per category, plus the optional gear fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateCard {
    pub junior_base_rate: f64,
    pub senior_base_rate: f64,
    pub gear_cost: f64,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            junior_base_rate: 80.0,
            senior_base_rate: 120.0,
            gear_cost: 125.0,
        }
    }
}

impl RateCard {
    pub fn junior_policy(&self, gear: bool) -> BillingPolicy {
        BillingPolicy::new(self.junior_base_rate, self.gear_fee(gear))
    }

    pub fn senior_policy(&self, gear: bool) -> BillingPolicy {
        BillingPolicy::new(self.senior_base_rate, self.gear_fee(gear))
    }

    fn gear_fee(&self, gear: bool) -> f64 {
        if gear {
            self.gear_cost
        } else {
            0.0
        }
    }
}

/// Attributes every student carries regardless of category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub months_enrolled: u32,
    pub rank: Rank,
}

impl Profile {
    pub fn new(name: impl Into<String>, months_enrolled: u32, rank: Rank) -> Self {
        Self {
            name: name.into(),
            months_enrolled,
            rank,
        }
    }
}

/// Capability shared by every kind of student record.
///
/// Implementors supply their category label, bill and variant-specific lines;
/// the shared header and the closing total are rendered by [`render`].
pub trait Participant: fmt::Display {
    fn profile(&self) -> &Profile;
    fn student_type(&self) -> &'static str;
    fn billing(&self) -> &BillingPolicy;
    fn write_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn name(&self) -> &str {
        &self.profile().name
    }

    fn rank(&self) -> Rank {
        self.profile().rank
    }

    fn months_enrolled(&self) -> u32 {
        self.profile().months_enrolled
    }

    fn total(&self) -> f64 {
        self.billing().total()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

fn render<P: Participant + ?Sized>(participant: &P, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let profile = participant.profile();
    writeln!(f, "Name: {}", profile.name)?;
    writeln!(f, "Type: {}", participant.student_type())?;
    writeln!(f, "Months Enrolled: {}", profile.months_enrolled)?;
    writeln!(f, "Rank: {}", profile.rank)?;
    participant.write_details(f)?;
    write!(f, "Total: ${:.2}", participant.total())
}

#[derive(Debug, Clone)]
pub struct JuniorStudent {
    profile: Profile,
    guardian_name: String,
    billing: BillingPolicy,
}

impl JuniorStudent {
    pub fn new(profile: Profile, guardian_name: impl Into<String>, billing: BillingPolicy) -> Self {
        Self {
            profile,
            guardian_name: guardian_name.into(),
            billing,
        }
    }

    pub fn guardian_name(&self) -> &str {
        &self.guardian_name
    }
}

/// Two juniors are the same student when name and guardian match exactly.
impl PartialEq for JuniorStudent {
    fn eq(&self, other: &Self) -> bool {
        self.profile.name == other.profile.name && self.guardian_name == other.guardian_name
    }
}

impl Participant for JuniorStudent {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn student_type(&self) -> &'static str {
        "Junior"
    }

    fn billing(&self) -> &BillingPolicy {
        &self.billing
    }

    fn write_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Guardian: {}", self.guardian_name)
    }
}

impl fmt::Display for JuniorStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

#[derive(Debug, Clone)]
pub struct SeniorStudent {
    profile: Profile,
    emergency_contact: String,
    billing: BillingPolicy,
}

impl SeniorStudent {
    pub fn new(profile: Profile, emergency_contact: impl Into<String>, billing: BillingPolicy) -> Self {
        Self {
            profile,
            emergency_contact: emergency_contact.into(),
            billing,
        }
    }

    pub fn emergency_contact(&self) -> &str {
        &self.emergency_contact
    }
}

impl Participant for SeniorStudent {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn student_type(&self) -> &'static str {
        "Senior"
    }

    fn billing(&self) -> &BillingPolicy {
        &self.billing
    }

    fn write_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Emergency Contact: {}", self.emergency_contact)
    }
}

impl fmt::Display for SeniorStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

/// A roster entry: one of the closed set of student categories.
#[derive(Debug, Clone)]
pub enum Student {
    Junior(JuniorStudent),
    Senior(SeniorStudent),
}

impl Student {
    pub fn junior(
        name: impl Into<String>,
        months_enrolled: u32,
        rank: Rank,
        guardian_name: impl Into<String>,
        gear: bool,
        rates: &RateCard,
    ) -> Self {
        Student::Junior(JuniorStudent::new(
            Profile::new(name, months_enrolled, rank),
            guardian_name,
            rates.junior_policy(gear),
        ))
    }

    pub fn senior(
        name: impl Into<String>,
        months_enrolled: u32,
        rank: Rank,
        emergency_contact: impl Into<String>,
        gear: bool,
        rates: &RateCard,
    ) -> Self {
        Student::Senior(SeniorStudent::new(
            Profile::new(name, months_enrolled, rank),
            emergency_contact,
            rates.senior_policy(gear),
        ))
    }

    fn inner(&self) -> &dyn Participant {
        match self {
            Student::Junior(junior) => junior,
            Student::Senior(senior) => senior,
        }
    }
}

impl Participant for Student {
    fn profile(&self) -> &Profile {
        self.inner().profile()
    }

    fn student_type(&self) -> &'static str {
        self.inner().student_type()
    }

    fn billing(&self) -> &BillingPolicy {
        self.inner().billing()
    }

    fn write_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner().write_details(f)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}
