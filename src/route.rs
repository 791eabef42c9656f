//! 路由表 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM。
//! 路由表 = 不可变的静态基线 + 登录后追加的动态路由；重置只丢弃动态部分。

use crate::session::Session;
use admin_console_shared::Role;
use std::cell::RefCell;

pub const LOGIN_PATH: &str = "/login";
pub const NOT_FOUND_PATH: &str = "/404";
pub const HOME_PATH: &str = "/";
pub const PROJECT_URL: &str = "https://github.com/AntonyCheng/spring-boot-init-template/";

/// 无需令牌即可访问的路径
const WHITE_LIST: &[&str] = &[LOGIN_PATH];

/// 重定向链的最大深度，防止配置成环
const MAX_REDIRECTS: usize = 8;

/// 页面标识，由外壳映射到具体视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    NotFound,
    Dashboard,
    UserManage,
    LogManage,
    FileManage,
    Example,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
    pub icon: String,
}

impl RouteMeta {
    pub fn new(title: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// 路由描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: Option<String>,
    pub page: Option<Page>,
    pub roles: Vec<Role>,
    pub hidden: bool,
    pub redirect: Option<String>,
    pub meta: Option<RouteMeta>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            page: None,
            roles: Role::ALL.to_vec(),
            hidden: false,
            redirect: None,
            meta: None,
            children: Vec::new(),
        }
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn roles(mut self, roles: &[Role]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn redirect(mut self, to: &str) -> Self {
        self.redirect = Some(to.to_string());
        self
    }

    pub fn meta(mut self, title: &str, icon: &str) -> Self {
        self.meta = Some(RouteMeta::new(title, icon));
        self
    }

    pub fn child(mut self, child: RouteDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_wildcard(&self) -> bool {
        self.path == "*"
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// 判断是否为外部链接
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("mailto:")
}

/// 父子路径拼接，外链与绝对路径保持原样
fn join_path(parent: &str, child: &str) -> String {
    if is_external(child) || child.starts_with('/') {
        return child.to_string();
    }
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        format!("/{}", child)
    } else {
        format!("{}/{}", parent, child)
    }
}

/// 静态基线路由，所有角色可访问的基础页面与按角色划分的管理页面
pub fn constant_routes() -> Vec<RouteDescriptor> {
    let both = [Role::Admin, Role::User];
    let admin = [Role::Admin];

    vec![
        RouteDescriptor::new(LOGIN_PATH)
            .page(Page::Login)
            .hidden()
            .roles(&both),
        RouteDescriptor::new(NOT_FOUND_PATH)
            .page(Page::NotFound)
            .hidden()
            .roles(&both),
        RouteDescriptor::new(HOME_PATH)
            .redirect("/dashboard")
            .roles(&both)
            .child(
                RouteDescriptor::new("dashboard")
                    .name("Dashboard")
                    .page(Page::Dashboard)
                    .meta("首页", "dashboard"),
            ),
        RouteDescriptor::new("/user").roles(&admin).child(
            RouteDescriptor::new("manage")
                .name("UserManage")
                .page(Page::UserManage)
                .meta("用户管理", "table"),
        ),
        RouteDescriptor::new("/log").roles(&admin).child(
            RouteDescriptor::new("manage")
                .name("LogManage")
                .page(Page::LogManage)
                .meta("日志管理", "el-icon-s-help"),
        ),
        RouteDescriptor::new("/file").roles(&admin).child(
            RouteDescriptor::new("manage")
                .name("FileManage")
                .page(Page::FileManage)
                .meta("文件管理", "el-icon-s-order"),
        ),
        RouteDescriptor::new("/example").roles(&admin).child(
            RouteDescriptor::new("example")
                .name("Example")
                .page(Page::Example)
                .meta("示例演示", "el-icon-s-grid"),
        ),
        RouteDescriptor::new("external-link")
            .roles(&both)
            .child(RouteDescriptor::new(PROJECT_URL).meta("项目地址", "link")),
        // 404 必须放在最后
        RouteDescriptor::new("*")
            .redirect(NOT_FOUND_PATH)
            .hidden()
            .roles(&both),
    ]
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// 跟随重定向后的最终路径
    pub path: String,
    pub page: Page,
    pub roles: Vec<Role>,
    pub meta: Option<RouteMeta>,
}

/// 侧边栏菜单项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub path: String,
    pub title: String,
    pub icon: String,
    pub external: bool,
}

/// 导航守卫的裁决
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(ResolvedRoute),
    Redirect(String),
}

/// 路由表
#[derive(Debug)]
pub struct RouteTable {
    base: Vec<RouteDescriptor>,
    dynamic: RefCell<Vec<RouteDescriptor>>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(constant_routes())
    }
}

impl RouteTable {
    pub fn new(base: Vec<RouteDescriptor>) -> Self {
        Self {
            base,
            dynamic: RefCell::new(Vec::new()),
        }
    }

    pub fn base(&self) -> &[RouteDescriptor] {
        &self.base
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.borrow().len()
    }

    /// 追加动态路由（优先于通配路由匹配）
    pub fn add_routes(&self, routes: Vec<RouteDescriptor>) {
        self.dynamic.borrow_mut().extend(routes);
    }

    /// 丢弃所有动态路由，恢复到静态基线
    pub fn reset(&self) {
        let dropped = std::mem::take(&mut *self.dynamic.borrow_mut());
        tracing::debug!(dropped = dropped.len(), "route table reset to baseline");
    }

    /// 匹配顺序：基线（不含通配） -> 动态路由 -> 通配
    fn ordered(&self) -> Vec<RouteDescriptor> {
        let dynamic = self.dynamic.borrow();
        let (wildcards, concrete): (Vec<_>, Vec<_>) =
            self.base.iter().cloned().partition(RouteDescriptor::is_wildcard);
        concrete
            .into_iter()
            .chain(dynamic.iter().cloned())
            .chain(wildcards)
            .collect()
    }

    /// 将路径解析为页面，跟随重定向与嵌套子路由
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let routes = self.ordered();
        let mut target = normalize(path);

        for _ in 0..MAX_REDIRECTS {
            match match_routes(&routes, &target) {
                Some(Matched::Page(route)) => return Some(route),
                Some(Matched::Redirect(to)) => target = normalize(&to),
                None => return None,
            }
        }
        tracing::warn!(path, "redirect chain too deep");
        None
    }

    /// 指定角色可见的菜单
    pub fn menu(&self, role: Role) -> Vec<MenuItem> {
        self.ordered()
            .iter()
            .filter(|r| !r.hidden && r.allows(role))
            .flat_map(|r| {
                let parent = r.path.clone();
                r.children
                    .iter()
                    .filter(|c| !c.hidden)
                    .filter_map(move |c| {
                        let meta = c.meta.as_ref()?;
                        let path = join_path(&parent, &c.path);
                        Some(MenuItem {
                            external: is_external(&path),
                            path,
                            title: meta.title.clone(),
                            icon: meta.icon.clone(),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// 导航守卫
    ///
    /// - 未登录：仅白名单可达，其余重定向到登录页并带上原路径
    /// - 已登录访问登录页：回到首页
    /// - 角色不匹配（资料已加载时）：404
    pub fn guard(&self, path: &str, session: &Session) -> Navigation {
        let target = normalize(path);

        if !session.has_token() {
            if WHITE_LIST.contains(&target.as_str()) {
                return match self.resolve(&target) {
                    Some(route) => Navigation::Allow(route),
                    None => Navigation::Redirect(NOT_FOUND_PATH.to_string()),
                };
            }
            return Navigation::Redirect(format!("{}?redirect={}", LOGIN_PATH, target));
        }

        if target == LOGIN_PATH {
            return Navigation::Redirect(HOME_PATH.to_string());
        }

        let Some(route) = self.resolve(&target) else {
            return Navigation::Redirect(NOT_FOUND_PATH.to_string());
        };

        if let Some(role) = session.role {
            if !route.roles.contains(&role) {
                return Navigation::Redirect(NOT_FOUND_PATH.to_string());
            }
        }

        Navigation::Allow(route)
    }
}

enum Matched {
    Page(ResolvedRoute),
    Redirect(String),
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/').to_string()
    } else if path.is_empty() {
        HOME_PATH.to_string()
    } else {
        path.to_string()
    }
}

fn match_routes(routes: &[RouteDescriptor], target: &str) -> Option<Matched> {
    for route in routes {
        if route.is_wildcard() {
            return route
                .redirect
                .clone()
                .map(Matched::Redirect)
                .or_else(|| {
                    route.page.map(|page| {
                        Matched::Page(ResolvedRoute {
                            path: target.to_string(),
                            page,
                            roles: route.roles.clone(),
                            meta: route.meta.clone(),
                        })
                    })
                });
        }

        if route.path == target {
            if let Some(to) = &route.redirect {
                return Some(Matched::Redirect(to.clone()));
            }
            if let Some(page) = route.page {
                return Some(Matched::Page(ResolvedRoute {
                    path: target.to_string(),
                    page,
                    roles: route.roles.clone(),
                    meta: route.meta.clone(),
                }));
            }
        }

        for child in &route.children {
            if join_path(&route.path, &child.path) != target {
                continue;
            }
            if let Some(to) = &child.redirect {
                return Some(Matched::Redirect(to.clone()));
            }
            if let Some(page) = child.page {
                // 子路由继承父路由的角色
                return Some(Matched::Page(ResolvedRoute {
                    path: target.to_string(),
                    page,
                    roles: route.roles.clone(),
                    meta: child.meta.clone(),
                }));
            }
        }
    }
    None
}
