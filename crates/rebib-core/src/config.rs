//! Bundled defaults
//!
//! The pipeline holds no implicit state: callers own persistence and pass
//! snapshots in. These constants are starting points a caller may use as-is
//! or replace entirely.

/// Default key template
pub const DEFAULT_KEY_TEMPLATE: &str = "[Auth][Year][Title][Venue]";

/// Fields kept on output by default
pub const DEFAULT_KEEP_FIELDS: &[&str] = &["author", "title", "booktitle", "journal", "year", "pages"];

/// All fields the keep-field selection UI typically offers
pub const ALL_FIELDS: &[&str] = &[
    "author",
    "title",
    "booktitle",
    "journal",
    "year",
    "pages",
    "volume",
    "number",
    "doi",
    "url",
    "eprint",
    "publisher",
    "editor",
    "month",
];

/// Bundled venue rule library covering the common CV/ML/NLP/robotics venues
pub const DEFAULT_RULES: &str = r#"# === Computer Vision (CV) ===
CVPRW|CVPR.*Workshop => CVPRW || CVPR Workshops
CVPR|Computer Vision and Pattern Recognition => CVPR || IEEE Conference on Computer Vision and Pattern Recognition
ICCV|International Conference on Computer Vision => ICCV || IEEE International Conference on Computer Vision
ECCV|European Conference on Computer Vision => ECCV || European Conference on Computer Vision
ACMMM|ACM MM|Multimedia => ACMMM || ACM International Conference on Multimedia
BMVC|British Machine Vision Conference => BMVC || British Machine Vision Conference
ACCV|Asian Conference on Computer Vision => ACCV || Asian Conference on Computer Vision

# === AI & Machine Learning ===
NeurIPS|NIPS|Neural Information Processing Systems => NIPS || Advances in Neural Information Processing Systems
ICML|International Conference on Machine Learning => ICML || International Conference on Machine Learning
ICLRW|ICLR.*Workshop => ICLRW || ICLR Workshops
ICLR|International Conference on Learning Representations => ICLR || International Conference on Learning Representations
AAAI|Association for the Advancement of Artificial Intelligence => AAAI || AAAI Conference on Artificial Intelligence
IJCAI|International Joint Conference on Artificial Intelligence => IJCAI || International Joint Conference on Artificial Intelligence

# === NLP & Computational Linguistics ===
ACL|Association for Computational Linguistics => ACL || Association for Computational Linguistics
EMNLP|Empirical Methods in Natural Language Processing => EMNLP || Conference on Empirical Methods in Natural Language Processing
NAACL|North American Chapter of the Association for Computational Linguistics => NAACL || North American Chapter of the Association for Computational Linguistics
EACL|European Chapter of the Association for Computational Linguistics => EACL || European Chapter of the Association for Computational Linguistics
COLING|International Conference on Computational Linguistics => COLING || International Conference on Computational Linguistics
TACL|Transactions of the Association for Computational Linguistics => TACL || Transactions of the Association for Computational Linguistics
LREC|Language Resources and Evaluation => LREC || International Conference on Language Resources and Evaluation
WMT|Workshop on Machine Translation => WMT || Conference on Machine Translation
CoNLL|Computational Natural Language Learning => CoNLL || Conference on Computational Natural Language Learning
SemEval|Semantic Evaluation => SemEval || International Workshop on Semantic Evaluation

# === Robotics ===
ICRA|International Conference on Robotics and Automation => ICRA || IEEE International Conference on Robotics and Automation
IROS|International Conference on Intelligent Robots and Systems => IROS || IEEE/RSJ International Conference on Intelligent Robots and Systems
RSS|Robotics: Science and Systems => RSS || Robotics: Science and Systems
CoRL|Conference on Robot Learning => CoRL || Conference on Robot Learning

# === Journals (CV/AI/Robotics) ===
TPAMI|Pattern Analysis and Machine Intelligence => PAMI || IEEE Transactions on Pattern Analysis and Machine Intelligence
IJCV|International Journal of Computer Vision => IJCV || International Journal of Computer Vision
TIP|Transactions on Image Processing => TIP || IEEE Transactions on Image Processing
TMM|Transactions on Multimedia => TMM || IEEE Transactions on Multimedia
PR$|Pattern Recognition$ => PR || Pattern Recognition
TCSVT|Circuits and Systems for Video Technology => TCSVT || IEEE Transactions on Circuits and Systems for Video Technology
SPL|Signal Processing Letters => SPL || IEEE Signal Processing Letters
CVIU|Computer Vision and Image Understanding => CVIU || Computer Vision and Image Understanding
TRO|Transactions on Robotics => TRO || IEEE Transactions on Robotics
IJRR|International Journal of Robotics Research => IJRR || The International Journal of Robotics Research
RAL|Robotics and Automation Letters => RAL || IEEE Robotics and Automation Letters
SciRob|Science Robotics => SciRob || Science Robotics
TASLP|Audio, Speech, and Language Processing => TASLP || IEEE/ACM Transactions on Audio, Speech, and Language Processing
CL|Computational Linguistics => CL || Computational Linguistics
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::compile;

    #[test]
    fn test_default_rules_all_compile() {
        let expected_lines = DEFAULT_RULES
            .lines()
            .filter(|l| !l.trim().is_empty() && !l.trim().starts_with('#'))
            .count();
        let rules = compile(DEFAULT_RULES);
        assert_eq!(rules.len(), expected_lines);
    }

    #[test]
    fn test_default_keep_fields_are_a_subset_of_all_fields() {
        for field in DEFAULT_KEEP_FIELDS {
            assert!(ALL_FIELDS.contains(field), "{} not in ALL_FIELDS", field);
        }
    }
}
