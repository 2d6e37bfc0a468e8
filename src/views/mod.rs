//! 服务端渲染视图
//!
//! 模板在编译期嵌入，启动时一次性注册到 Tera。每个页面对应一个可序列化的
//! 数据结构，导航信息统一由 [`Nav`] 提供。

use axum::response::Html;
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

use crate::{
    auth::SessionUser,
    error::AppError,
    models::{DashboardMetrics, Role},
};

const TPL_BASE: &str = include_str!("templates/base.html");
const TPL_LOGIN: &str = include_str!("templates/login.html");
const TPL_DASHBOARD: &str = include_str!("templates/dashboard.html");
const TPL_CLIENTES: &str = include_str!("templates/clientes.html");
const TPL_CLIENTE_FORM: &str = include_str!("templates/cliente_form.html");
const TPL_OS_LISTA: &str = include_str!("templates/os_lista.html");
const TPL_OS_NOVA: &str = include_str!("templates/os_nova.html");
const TPL_OS_DETALHES: &str = include_str!("templates/os_detalhes.html");
const TPL_USUARIO_FORM: &str = include_str!("templates/usuario_form.html");

/// 页面模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    Clientes,
    ClienteForm,
    OrdensLista,
    OrdemNova,
    OrdemDetalhes,
    UsuarioForm,
}

impl Page {
    pub fn template(&self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Dashboard => "dashboard.html",
            Page::Clientes => "clientes.html",
            Page::ClienteForm => "cliente_form.html",
            Page::OrdensLista => "os_lista.html",
            Page::OrdemNova => "os_nova.html",
            Page::OrdemDetalhes => "os_detalhes.html",
            Page::UsuarioForm => "usuario_form.html",
        }
    }
}

/// 导航栏高亮的分区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Clientes,
    Os,
    Admin,
}

/// 所有登录后页面共用的导航上下文
#[derive(Debug, Clone, Serialize)]
pub struct Nav {
    pub usuario: String,
    pub papel: Role,
    pub pagina_atual: Section,
}

impl Nav {
    pub fn new(user: &SessionUser, section: Section) -> Self {
        Self {
            usuario: user.username.clone(),
            papel: user.role,
            pagina_atual: section,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub erro: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    #[serde(flatten)]
    pub nav: Nav,
    pub dados: DashboardMetrics,
    pub erro: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ClientesPage {
    #[serde(flatten)]
    pub nav: Nav,
    pub clientes: Vec<Value>,
    pub erro: Option<&'static str>,
}

/// 新建（`cliente` 为空）与编辑共用的客户表单
#[derive(Debug, Serialize)]
pub struct ClienteFormPage {
    #[serde(flatten)]
    pub nav: Nav,
    pub cliente: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct OrdensPage {
    #[serde(flatten)]
    pub nav: Nav,
    pub lista_os: Vec<Value>,
    pub erro: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct OrdemNovaPage {
    #[serde(flatten)]
    pub nav: Nav,
    pub clientes: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct OrdemDetalhesPage {
    #[serde(flatten)]
    pub nav: Nav,
    pub os: Value,
}

#[derive(Debug, Serialize)]
pub struct UsuarioFormPage {
    #[serde(flatten)]
    pub nav: Nav,
}

/// 模板渲染器
pub struct Views {
    tera: Tera,
}

impl Views {
    /// 注册全部嵌入模板
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", TPL_BASE),
            ("login.html", TPL_LOGIN),
            ("dashboard.html", TPL_DASHBOARD),
            ("clientes.html", TPL_CLIENTES),
            ("cliente_form.html", TPL_CLIENTE_FORM),
            ("os_lista.html", TPL_OS_LISTA),
            ("os_nova.html", TPL_OS_NOVA),
            ("os_detalhes.html", TPL_OS_DETALHES),
            ("usuario_form.html", TPL_USUARIO_FORM),
        ])?;

        Ok(Self { tera })
    }

    pub fn render<T>(&self, page: Page, data: &T) -> Result<Html<String>, AppError>
    where
        T: Serialize,
    {
        let context = Context::from_serialize(data)?;
        let html = self.tera.render(page.template(), &context)?;
        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nav(role: Role, section: Section) -> Nav {
        let user = SessionUser::new("ana".to_string(), "pw".to_string(), role);
        Nav::new(&user, section)
    }

    #[test]
    fn test_all_templates_register() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_login_page_with_error() {
        let views = Views::new().unwrap();
        let html = views
            .render(Page::Login, &LoginPage { erro: Some("Usuário ou senha incorretos!") })
            .unwrap();
        assert!(html.0.contains("Usuário ou senha incorretos!"));
        assert!(!html.0.contains("/logout"));
    }

    #[test]
    fn test_admin_links_only_for_admin() {
        let views = Views::new().unwrap();
        let clientes = vec![json!({"id": 1, "nome": "Carlos"})];

        let admin = views
            .render(
                Page::Clientes,
                &ClientesPage {
                    nav: nav(Role::Admin, Section::Clientes),
                    clientes: clientes.clone(),
                    erro: None,
                },
            )
            .unwrap();
        assert!(admin.0.contains("/excluir/1"));
        assert!(admin.0.contains("/usuarios/novo"));

        let staff = views
            .render(
                Page::Clientes,
                &ClientesPage {
                    nav: nav(Role::Funcionario, Section::Clientes),
                    clientes,
                    erro: None,
                },
            )
            .unwrap();
        assert!(staff.0.contains("Carlos"));
        assert!(!staff.0.contains("/excluir/1"));
        assert!(!staff.0.contains("/usuarios/novo"));
    }

    #[test]
    fn test_backend_values_are_escaped() {
        let views = Views::new().unwrap();
        let html = views
            .render(
                Page::OrdemDetalhes,
                &OrdemDetalhesPage {
                    nav: nav(Role::Funcionario, Section::Os),
                    os: json!({"id": 3, "descricao": "<b>tela</b>"}),
                },
            )
            .unwrap();
        assert!(html.0.contains("&lt;b&gt;tela&lt;&#x2F;b&gt;"));
    }
}
