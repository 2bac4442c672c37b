//! 画面状態コントローラ
//!
//! スキャン一覧・選択中スキャン・表示画面・ロールを保持する。
//! 遷移は単純な代入で失敗しない。ロールによるアクセス制御は
//! 遷移時ではなく `render_target` の時点で行う。

use chrono::{DateTime, Utc};

use crate::seed::seed_scans;
use crate::types::{ScanResult, UserRole};

/// 表示画面（履歴スタックは持たない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Upload,
    Analysis,
    Admin,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Upload => "upload",
            Screen::Analysis => "analysis",
            Screen::Admin => "admin",
        }
    }

    /// ナビゲーションの表示名
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Upload => "Upload Scan",
            Screen::Analysis => "Analysis",
            Screen::Admin => "Admin Console",
        }
    }
}

/// 実際に描画する内容
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderTarget<'a> {
    Dashboard,
    Upload,
    Analysis(&'a ScanResult),
    Admin,
    AccessDenied,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    scans: Vec<ScanResult>,
    selected: Option<ScanResult>,
    active: Screen,
    role: UserRole,
}

impl ViewState {
    /// ダッシュボード・放射線科医ロール・未選択で開始
    pub fn new(scans: Vec<ScanResult>) -> Self {
        Self {
            scans,
            selected: None,
            active: Screen::Dashboard,
            role: UserRole::Radiologist,
        }
    }

    /// サンプル3件を投入した初期状態
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(seed_scans(now))
    }

    pub fn scans(&self) -> &[ScanResult] {
        &self.scans
    }

    pub fn selected(&self) -> Option<&ScanResult> {
        self.selected.as_ref()
    }

    pub fn active_screen(&self) -> Screen {
        self.active
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn select_scan(&mut self, scan: ScanResult) {
        self.selected = Some(scan);
        self.active = Screen::Analysis;
    }

    /// 新規スキャンを先頭に追加し、その解析画面へ
    pub fn complete_upload(&mut self, scan: ScanResult) {
        self.scans.insert(0, scan.clone());
        self.selected = Some(scan);
        self.active = Screen::Analysis;
    }

    /// 解析画面からダッシュボードへ（選択は保持）
    pub fn back(&mut self) {
        self.active = Screen::Dashboard;
    }

    /// ロール切替。管理者になれば admin、放射線科医に戻れば dashboard へ
    pub fn toggle_role(&mut self) {
        self.role = self.role.toggled();
        self.active = match self.role {
            UserRole::Administrator => Screen::Admin,
            UserRole::Radiologist => Screen::Dashboard,
        };
    }

    /// ナビゲーションからの遷移。ロールに関係なく常に成功する
    pub fn navigate(&mut self, screen: Screen) {
        self.active = screen;
    }

    pub fn render_target(&self) -> RenderTarget<'_> {
        match self.active {
            Screen::Dashboard => RenderTarget::Dashboard,
            Screen::Upload => RenderTarget::Upload,
            Screen::Analysis => match &self.selected {
                Some(scan) => RenderTarget::Analysis(scan),
                None => RenderTarget::Dashboard,
            },
            Screen::Admin => match self.role {
                UserRole::Administrator => RenderTarget::Admin,
                UserRole::Radiologist => RenderTarget::AccessDenied,
            },
        }
    }

    /// サイドバーに並べる画面
    pub fn nav_items(&self) -> Vec<Screen> {
        let mut items = vec![Screen::Dashboard, Screen::Upload];
        if self.role == UserRole::Administrator {
            items.push(Screen::Admin);
        }
        items
    }

    pub fn role_switch_label(&self) -> &'static str {
        match self.role {
            UserRole::Administrator => "Switch to Radiologist View (Demo)",
            UserRole::Radiologist => "Switch to Admin View (Demo)",
        }
    }
}
