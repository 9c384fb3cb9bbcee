//! Static coping-suggestion reference data: 13 conditions, 3 risk tiers,
//! 3 ordered suggestions per cell. The first item in each cell is the
//! headline suggestion shown in the UI, so order matters and is preserved.

use mindtrace_common::types::RiskTier;

/// Returned for any (condition, tier) pair outside the table, including
/// every NoRisk lookup.
pub const FALLBACK_RECOMMENDATION: &str = "No specific recommendations available.";

struct TierRecommendations {
    low: [&'static str; 3],
    moderate: [&'static str; 3],
    high: [&'static str; 3],
}

static ADHD: TierRecommendations = TierRecommendations {
    low: [
        "Try breaking tasks into short, timed work blocks.",
        "Keep a daily written checklist to offload working memory.",
        "Build short movement breaks into your routine.",
    ],
    moderate: [
        "Use external reminders and alarms for commitments.",
        "Reduce distractions in your workspace one at a time.",
        "Consider discussing focus difficulties with a healthcare provider.",
    ],
    high: [
        "Schedule an evaluation with a clinician experienced in ADHD.",
        "Ask someone you trust to help you structure this week.",
        "Prioritize sleep; fatigue sharply worsens attention.",
    ],
};

static BPD: TierRecommendations = TierRecommendations {
    low: [
        "Practice naming emotions as they arise.",
        "Keep a mood journal to spot triggers.",
        "Try grounding exercises when feelings surge.",
    ],
    moderate: [
        "Look into dialectical behavior therapy (DBT) skills groups.",
        "Plan ahead for situations that strain relationships.",
        "Share your coping plan with someone you trust.",
    ],
    high: [
        "Reach out to a therapist experienced with DBT as soon as you can.",
        "Use a crisis plan with named contacts for intense episodes.",
        "Avoid major decisions during emotional surges.",
    ],
};

static OCD: TierRecommendations = TierRecommendations {
    low: [
        "Notice intrusive thoughts without acting on them.",
        "Delay rituals by a few minutes and observe the urge.",
        "Keep a log of obsession triggers.",
    ],
    moderate: [
        "Learn about exposure and response prevention (ERP).",
        "Set gradual goals for resisting compulsions.",
        "Consider a consultation with a CBT therapist.",
    ],
    high: [
        "Seek a clinician trained in ERP promptly.",
        "Enlist family support to avoid accommodating rituals.",
        "Discuss treatment options with a psychiatrist.",
    ],
};

static PTSD: TierRecommendations = TierRecommendations {
    low: [
        "Practice slow breathing when reminders appear.",
        "Maintain predictable daily routines.",
        "Stay connected with supportive people.",
    ],
    moderate: [
        "Try grounding techniques during flashbacks (5-4-3-2-1).",
        "Limit exposure to avoidable triggers while you build skills.",
        "Consider trauma-focused therapy.",
    ],
    high: [
        "Contact a trauma-focused therapist (EMDR or CPT) soon.",
        "Create a safety plan for severe flashbacks.",
        "Avoid alcohol as a coping tool; it worsens symptoms.",
    ],
};

static ANXIETY: TierRecommendations = TierRecommendations {
    low: [
        "Try a short daily breathing or relaxation practice.",
        "Limit caffeine late in the day.",
        "Take a brief walk when worry builds.",
    ],
    moderate: [
        "Schedule a daily 'worry window' to contain rumination.",
        "Practice progressive muscle relaxation before bed.",
        "Consider talking to a counselor about CBT.",
    ],
    high: [
        "Seek professional support for anxiety soon.",
        "Use paced breathing during panic surges.",
        "Reduce stimulants and prioritize regular sleep.",
    ],
};

static AUTISM: TierRecommendations = TierRecommendations {
    low: [
        "Protect time for decompression after social demands.",
        "Use noise-reducing tools in overstimulating settings.",
        "Keep routines that help you feel regulated.",
    ],
    moderate: [
        "Identify and plan around your main sensory stressors.",
        "Communicate your needs explicitly to people close to you.",
        "Consider connecting with neurodivergent peer communities.",
    ],
    high: [
        "Seek support from an autism-informed clinician.",
        "Build a low-stimulation recovery plan for overload days.",
        "Ask a trusted person to help with demanding logistics.",
    ],
};

static BIPOLAR: TierRecommendations = TierRecommendations {
    low: [
        "Keep consistent sleep and wake times.",
        "Track your mood daily to learn your patterns.",
        "Watch for early signs of mood shifts.",
    ],
    moderate: [
        "Share your early-warning signs with someone you trust.",
        "Avoid major commitments during mood swings.",
        "Consider a mood-disorder specialist consultation.",
    ],
    high: [
        "Contact a psychiatrist promptly about mood stabilization.",
        "Protect sleep rigorously; disruption can trigger episodes.",
        "Delay big financial or life decisions until stable.",
    ],
};

static DEPRESSION: TierRecommendations = TierRecommendations {
    low: [
        "Take a short walk outside each day.",
        "Keep one small, achievable goal per day.",
        "Stay in contact with at least one supportive person.",
    ],
    moderate: [
        "Schedule activities you used to enjoy, even briefly.",
        "Maintain regular meals and sleep times.",
        "Consider talking to a counselor or therapist.",
    ],
    high: [
        "Reach out to a mental health professional as soon as possible.",
        "Tell someone you trust how you are feeling today.",
        "If you have thoughts of self-harm, contact a crisis line immediately.",
    ],
};

static EATING_DISORDERS: TierRecommendations = TierRecommendations {
    low: [
        "Aim for regular, unhurried meals.",
        "Note thoughts that link food to self-worth.",
        "Limit time with content that promotes body comparison.",
    ],
    moderate: [
        "Consider a check-in with a doctor or dietitian.",
        "Eat with supportive company when possible.",
        "Challenge rigid food rules one at a time.",
    ],
    high: [
        "Seek specialized eating-disorder treatment promptly.",
        "Ask a trusted person to support you at mealtimes.",
        "Schedule a medical check of your physical health.",
    ],
};

static HEALTH: TierRecommendations = TierRecommendations {
    low: [
        "Set a time each day that is worry-free by design.",
        "Limit symptom-searching online.",
        "Keep up gentle, regular exercise.",
    ],
    moderate: [
        "Agree on a sensible check-up schedule with your doctor and stick to it.",
        "Practice redirecting attention when body-scanning starts.",
        "Consider CBT techniques for health anxiety.",
    ],
    high: [
        "Discuss persistent health worries with a professional.",
        "Avoid repeated reassurance-seeking; it feeds the cycle.",
        "Treat sleep and routine as part of your care.",
    ],
};

static MENTAL_ILLNESS: TierRecommendations = TierRecommendations {
    low: [
        "Keep a simple daily record of mood and energy.",
        "Maintain social contact, even briefly.",
        "Protect basic routines: sleep, meals, movement.",
    ],
    moderate: [
        "Talk to a professional about what you have been noticing.",
        "Identify your most reliable sources of support.",
        "Reduce avoidable stressors where you can.",
    ],
    high: [
        "Arrange a mental health assessment soon.",
        "Involve someone you trust in your next steps.",
        "Keep crisis contacts written down and accessible.",
    ],
};

static SCHIZOPHRENIA: TierRecommendations = TierRecommendations {
    low: [
        "Keep regular sleep; disruption can worsen symptoms.",
        "Stay connected to family or trusted friends.",
        "Note experiences that feel unusual and when they happen.",
    ],
    moderate: [
        "Discuss unusual experiences with a clinician.",
        "Avoid cannabis and stimulants; they can aggravate symptoms.",
        "Keep a consistent daily structure.",
    ],
    high: [
        "Seek psychiatric care promptly.",
        "Involve family or a trusted person in treatment planning.",
        "Keep crisis contacts available at all times.",
    ],
};

static SUICIDE_WATCH: TierRecommendations = TierRecommendations {
    low: [
        "Talk to someone you trust about how you are feeling.",
        "Remove or secure means of self-harm where possible.",
        "Keep a list of reasons and people that matter to you.",
    ],
    moderate: [
        "Contact a counselor or crisis service to talk things through.",
        "Make a safety plan with specific steps and contacts.",
        "Avoid being alone during your hardest hours.",
    ],
    high: [
        "Contact a crisis line or emergency services now.",
        "Tell someone nearby how you are feeling today.",
        "Do not stay alone; stay with someone until you feel safer.",
    ],
};

fn condition_table(condition: &str) -> Option<&'static TierRecommendations> {
    match condition {
        "ADHD" => Some(&ADHD),
        "BPD" => Some(&BPD),
        "OCD" => Some(&OCD),
        "PTSD" => Some(&PTSD),
        "Anxiety" => Some(&ANXIETY),
        "Autism" => Some(&AUTISM),
        "Bipolar" => Some(&BIPOLAR),
        "Depression" => Some(&DEPRESSION),
        "Eating Disorders" => Some(&EATING_DISORDERS),
        "Health" => Some(&HEALTH),
        "Mental Illness" => Some(&MENTAL_ILLNESS),
        "Schizophrenia" => Some(&SCHIZOPHRENIA),
        "Suicide Watch" => Some(&SUICIDE_WATCH),
        _ => None,
    }
}

/// Resolve the ordered suggestion list for a (condition, tier) pair.
/// Misses — unknown condition or a NoRisk tier — return the single-element
/// fallback list. No mutation, no deduplication.
pub fn resolve(condition: &str, tier: RiskTier) -> Vec<String> {
    let Some(table) = condition_table(condition) else {
        return vec![FALLBACK_RECOMMENDATION.to_string()];
    };

    let cell = match tier {
        RiskTier::Low => &table.low,
        RiskTier::Moderate => &table.moderate,
        RiskTier::High => &table.high,
        RiskTier::NoRisk => return vec![FALLBACK_RECOMMENDATION.to_string()],
    };

    cell.iter().map(|s| s.to_string()).collect()
}
