use mindtrace_common::api::explain::ExplanationKind;

/// Machine labels the disorder classifier emits, in class-index order.
const DISORDER_LABELS: [&str; 13] = [
    "ADHD",
    "BPD",
    "OCD",
    "PTSD",
    "Anxiety",
    "Autism",
    "Bipolar",
    "Depression",
    "Eating Disorders",
    "Health",
    "Mental Illness",
    "Schizophrenia",
    "Suicide Watch",
];

/// Sentiment classes, in class-index order.
const SENTIMENT_LABELS: [&str; 3] = ["Negative", "Neutral", "Positive"];

/// Map a raw machine label (`LABEL_<n>`) to its human-readable name.
/// Anything unmapped resolves to "Unknown" rather than failing the call.
pub fn human_label(kind: ExplanationKind, raw: &str) -> String {
    let table: &[&str] = match kind {
        ExplanationKind::Sentiment => &SENTIMENT_LABELS,
        ExplanationKind::Disorder => &DISORDER_LABELS,
    };

    let mapped = raw
        .strip_prefix("LABEL_")
        .and_then(|n| n.parse::<usize>().ok())
        .and_then(|i| table.get(i).copied());

    match mapped {
        Some(name) => name.to_string(),
        None => {
            tracing::warn!(kind = kind.as_str(), label = raw, "Unmapped model label");
            "Unknown".to_string()
        }
    }
}

/// Map a numeric class index (as returned by the explanation service) to
/// its human-readable name.
pub fn human_label_for_class(kind: ExplanationKind, class_index: u32) -> String {
    human_label(kind, &format!("LABEL_{}", class_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disorder_label_mapping() {
        assert_eq!(
            human_label(ExplanationKind::Disorder, "LABEL_7"),
            "Depression"
        );
        assert_eq!(human_label(ExplanationKind::Disorder, "LABEL_0"), "ADHD");
        assert_eq!(
            human_label(ExplanationKind::Disorder, "LABEL_12"),
            "Suicide Watch"
        );
    }

    #[test]
    fn test_sentiment_label_mapping() {
        assert_eq!(
            human_label(ExplanationKind::Sentiment, "LABEL_0"),
            "Negative"
        );
        assert_eq!(
            human_label(ExplanationKind::Sentiment, "LABEL_2"),
            "Positive"
        );
    }

    #[test]
    fn test_unmapped_label_is_unknown() {
        assert_eq!(human_label(ExplanationKind::Disorder, "LABEL_13"), "Unknown");
        assert_eq!(human_label(ExplanationKind::Sentiment, "garbage"), "Unknown");
        assert_eq!(human_label(ExplanationKind::Sentiment, "LABEL_x"), "Unknown");
    }

    #[test]
    fn test_class_index_mapping() {
        assert_eq!(
            human_label_for_class(ExplanationKind::Disorder, 4),
            "Anxiety"
        );
        assert_eq!(
            human_label_for_class(ExplanationKind::Sentiment, 1),
            "Neutral"
        );
        assert_eq!(human_label_for_class(ExplanationKind::Disorder, 99), "Unknown");
    }
}
