/// Pick the model a new session defaults to.
///
/// Priority: a `llama-3` model that is not a guard model, then `mixtral`,
/// then anything that is not a guard/whisper/orpheus model, then whatever
/// the service listed first.
pub fn pick_default_model(ids: &[String]) -> Option<&str> {
    ids.iter()
        .find(|id| id.contains("llama-3") && !id.contains("guard"))
        .or_else(|| ids.iter().find(|id| id.contains("mixtral")))
        .or_else(|| {
            ids.iter().find(|id| {
                !id.contains("guard") && !id.contains("whisper") && !id.contains("orpheus")
            })
        })
        .or_else(|| ids.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn prefers_llama_3_over_everything() {
        let models = ids(&["mixtral-8x7b", "llama-3.1-8b-instant", "gemma2-9b-it"]);
        assert_eq!(pick_default_model(&models), Some("llama-3.1-8b-instant"));
    }

    #[test]
    fn skips_llama_guard_variants() {
        let models = ids(&["llama-3-guard-8b", "mixtral-8x7b"]);
        assert_eq!(pick_default_model(&models), Some("mixtral-8x7b"));
    }

    #[test]
    fn avoids_audio_and_guard_models_when_possible() {
        let models = ids(&["whisper-large-v3", "orpheus-tts", "gemma2-9b-it"]);
        assert_eq!(pick_default_model(&models), Some("gemma2-9b-it"));
    }

    #[test]
    fn falls_back_to_first_model() {
        let models = ids(&["whisper-large-v3", "guard-2"]);
        assert_eq!(pick_default_model(&models), Some("whisper-large-v3"));
    }

    #[test]
    fn empty_list_yields_none() {
        assert_eq!(pick_default_model(&[]), None);
    }
}
