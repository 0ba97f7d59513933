/// 编排器状态：`Idle -> Preparing -> Downloading -> Completed | Aborted`。
///
/// `Aborted` 只在编排器自身无法初始化时出现，单个文件失败不会导致中止。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrchestratorState {
    #[default]
    Idle,
    Preparing,
    Downloading,
    Completed,
    Aborted,
}

impl OrchestratorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}
