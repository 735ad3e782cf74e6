#[doc = "수평 임계선(annotation line)의 종류"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /* 하한 임계선 (preset_min) */
    Warning,
    /* 상한 임계선 (preset_max) */
    Critical,
}
