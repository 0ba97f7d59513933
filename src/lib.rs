/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::remote::*;

/// 清单记录、下载任务与路径还原
pub mod site_file {
    use crate::internal;
    pub use internal::site_file::functions::materialize::*;
    pub use internal::site_file::structs::*;
}

pub mod progress {
    use crate::internal;
    pub use internal::progress::structs::*;
}

/// 单文件流式下载，以及可替换的文件来源
pub mod fetcher {
    use crate::internal;
    pub use internal::fetcher::structs::*;
    pub use internal::fetcher::traits::*;
}

pub mod scheduler {
    use crate::internal;
    pub use internal::scheduler::structs::*;
}

pub mod orchestrator {
    use crate::internal;
    pub use internal::orchestrator::structs::*;
}

/// 对外提供 Netlify 基础访问能力，不限制死在入口函数中，以防有人自己要用
pub mod netlify {
    pub mod constants {
        pub use crate::internal::netlify::constants::*;
    }

    pub mod functions {
        pub use crate::internal::netlify::functions::*;
    }

    pub mod structs {
        pub use crate::internal::netlify::structs::*;
    }
}

pub mod archive {
    use crate::internal;
    pub use internal::archive::functions::*;
    pub use internal::archive::structs::*;
}
