// 🔍 Technical audit demo dataset
// Scores, findings, technical debt, recommendations and current system
// metrics for a fictional client. Built once per process.

use serde::Serialize;
use std::sync::OnceLock;

// ============================================================================
// CLASSIFICATIONS
// ============================================================================

/// Severity of a finding; also used for impact ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    #[serde(rename = "Crítico")]
    Critical,
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Bajo")]
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::Critical, Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Crítico",
            Severity::High => "Alto",
            Severity::Medium => "Medio",
            Severity::Low => "Bajo",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::P0, Priority::P1, Priority::P2, Priority::P3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }

    /// Heading used when grouping recommendations
    pub fn title(&self) -> &'static str {
        match self {
            Priority::P0 => "Crítico - Acción Inmediata",
            Priority::P1 => "Alta - Corto Plazo",
            Priority::P2 => "Media - Mediano Plazo",
            Priority::P3 => "Baja - Largo Plazo",
        }
    }

    /// Time horizon shown in the priority legend
    pub fn horizon(&self) -> &'static str {
        match self {
            Priority::P0 => "Acción inmediata (1-2 semanas)",
            Priority::P1 => "Corto plazo (1-2 meses)",
            Priority::P2 => "Mediano plazo (3-6 meses)",
            Priority::P3 => "Largo plazo (6+ meses)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effort {
    #[serde(rename = "Corto")]
    Short,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Largo")]
    Long,
}

impl Effort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Short => "Corto",
            Effort::Medium => "Medio",
            Effort::Long => "Largo",
        }
    }
}

// ============================================================================
// TABLES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    #[serde(rename = "Categoría")]
    pub category: &'static str,
    #[serde(rename = "Puntuación")]
    pub score: u32,
    #[serde(rename = "Crítico")]
    pub critical: u32,
    #[serde(rename = "Medio")]
    pub medium: u32,
    #[serde(rename = "Bajo")]
    pub low: u32,
}

/// Long-form write-up attached to a finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindingDetail {
    pub description: &'static str,
    pub risk: &'static str,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    #[serde(rename = "ID")]
    pub id: &'static str,
    #[serde(rename = "Título")]
    pub title: &'static str,
    #[serde(rename = "Severidad")]
    pub severity: Severity,
    #[serde(rename = "Área")]
    pub area: &'static str,
    #[serde(rename = "Esfuerzo")]
    pub effort: &'static str,
    #[serde(rename = "Impacto")]
    pub impact: Severity,
    #[serde(skip)]
    pub detail: Option<FindingDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechDebt {
    #[serde(rename = "Componente")]
    pub component: &'static str,
    #[serde(rename = "Horas")]
    pub hours: u32,
    #[serde(rename = "Costo_USD")]
    pub cost_usd: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "Prioridad")]
    pub priority: Priority,
    #[serde(rename = "Acción")]
    pub action: &'static str,
    #[serde(rename = "Impacto")]
    pub impact: Severity,
    #[serde(rename = "Esfuerzo")]
    pub effort: Effort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetrics {
    /// Percent
    pub uptime: f64,
    pub avg_response_ms: u32,
    pub monthly_errors: u32,
    /// Percent
    pub test_coverage: u32,
    pub monthly_incidents: u32,
    pub previous_monthly_incidents: u32,
    pub avg_resolution_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benchmark {
    #[serde(rename = "Métrica")]
    pub metric: &'static str,
    #[serde(rename = "Actual")]
    pub actual: f64,
    #[serde(rename = "Estándar Industria")]
    pub standard: f64,
    /// Distance from the industry standard (actual − standard)
    #[serde(rename = "Gap")]
    pub gap: f64,
}

impl Benchmark {
    pub fn new(metric: &'static str, actual: f64, standard: f64) -> Self {
        let gap = crate::stats::round1(actual - standard);
        Benchmark { metric, actual, standard, gap }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapPhase {
    #[serde(rename = "Fase")]
    pub phase: &'static str,
    #[serde(rename = "Acciones")]
    pub actions: &'static str,
    #[serde(rename = "Progreso")]
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditData {
    pub scores: Vec<CategoryScore>,
    pub findings: Vec<Finding>,
    pub debt: Vec<TechDebt>,
    pub recommendations: Vec<Recommendation>,
    pub metrics: SystemMetrics,
    pub roadmap: Vec<RoadmapPhase>,
}

/// Industry targets the current metrics are compared against
pub const UPTIME_TARGET: f64 = 99.9;
pub const RESPONSE_BENCHMARK_MS: u32 = 500;
pub const COVERAGE_STANDARD: u32 = 80;
pub const MTTR_STANDARD_HOURS: f64 = 2.0;

impl AuditData {
    pub fn demo() -> Self {
        let score = |category, score, critical, medium, low| CategoryScore { category, score, critical, medium, low };
        let scores = vec![
            score("Infraestructura", 65, 2, 3, 1),
            score("Seguridad", 45, 4, 2, 1),
            score("Código", 55, 3, 4, 2),
            score("Documentación", 30, 5, 3, 1),
            score("Rendimiento", 70, 1, 2, 3),
            score("Mantenibilidad", 40, 4, 3, 2),
            score("Escalabilidad", 50, 2, 4, 2),
            score("Monitoreo", 35, 3, 4, 2),
        ];

        let findings = vec![
            Finding {
                id: "HAL-001",
                title: "Credenciales hardcodeadas en repositorio",
                severity: Severity::Critical,
                area: "Seguridad",
                effort: "2-3 días",
                impact: Severity::High,
                detail: Some(FindingDetail {
                    description: "Se encontraron credenciales de acceso (API keys, contraseñas de BD) hardcodeadas directamente en el código fuente y versionadas en Git.",
                    risk: "Exposición de credenciales sensibles. Cualquier persona con acceso al repositorio puede obtener acceso completo a sistemas críticos.",
                    recommendation: "Implementar gestión de secretos con herramientas como HashiCorp Vault, AWS Secrets Manager o variables de entorno seguras. Rotar inmediatamente todas las credenciales expuestas.",
                }),
            },
            Finding {
                id: "HAL-002",
                title: "Sin backup automatizado de base de datos",
                severity: Severity::Critical,
                area: "Infraestructura",
                effort: "1 semana",
                impact: Severity::Critical,
                detail: Some(FindingDetail {
                    description: "No existe sistema de backup automatizado para la base de datos de producción. Los backups se realizan manualmente de forma irregular.",
                    risk: "Pérdida total de datos en caso de falla de hardware, corrupción o error humano. Sin capacidad de recuperación ante desastres.",
                    recommendation: "Configurar backups automáticos diarios con retención de 30 días, implementar snapshots incrementales y realizar pruebas de restauración mensuales.",
                }),
            },
            Finding {
                id: "HAL-003",
                title: "API sin rate limiting",
                severity: Severity::High,
                area: "Seguridad",
                effort: "3-4 días",
                impact: Severity::High,
                detail: None,
            },
            Finding {
                id: "HAL-004",
                title: "Documentación técnica inexistente",
                severity: Severity::Medium,
                area: "Documentación",
                effort: "2 semanas",
                impact: Severity::Medium,
                detail: None,
            },
            Finding {
                id: "HAL-005",
                title: "Logs sin centralizar ni monitorear",
                severity: Severity::High,
                area: "Monitoreo",
                effort: "1 semana",
                impact: Severity::High,
                detail: None,
            },
        ];

        let debt = vec![
            TechDebt { component: "Sistema Legacy", hours: 240, cost_usd: 18000 },
            TechDebt { component: "Integraciones", hours: 120, cost_usd: 9000 },
            TechDebt { component: "Testing", hours: 180, cost_usd: 13500 },
            TechDebt { component: "Documentación", hours: 160, cost_usd: 12000 },
            TechDebt { component: "Infraestructura", hours: 100, cost_usd: 7500 },
        ];

        let rec = |priority, action, impact, effort| Recommendation { priority, action, impact, effort };
        let recommendations = vec![
            rec(Priority::P0, "Implementar gestión de secretos (Vault/AWS Secrets)", Severity::Critical, Effort::Short),
            rec(Priority::P0, "Configurar backup automatizado con retención 30 días", Severity::Critical, Effort::Medium),
            rec(Priority::P1, "Agregar rate limiting y throttling en APIs", Severity::High, Effort::Short),
            rec(Priority::P1, "Implementar logging centralizado (ELK/Datadog)", Severity::High, Effort::Medium),
            rec(Priority::P2, "Crear documentación arquitectónica básica", Severity::Medium, Effort::Long),
            rec(Priority::P2, "Implementar CI/CD pipeline básico", Severity::Medium, Effort::Medium),
            rec(Priority::P3, "Configurar monitoreo de métricas clave", Severity::Medium, Effort::Short),
        ];

        let metrics = SystemMetrics {
            uptime: 94.2,
            avg_response_ms: 850,
            monthly_errors: 1247,
            test_coverage: 23,
            monthly_incidents: 8,
            previous_monthly_incidents: 5,
            avg_resolution_hours: 6.5,
        };

        let phase = |phase, actions| RoadmapPhase { phase, actions, progress: 0 };
        let roadmap = vec![
            phase("Mes 1-2", "P0: Seguridad crítica y backups"),
            phase("Mes 3-4", "P1: Monitoreo y logging"),
            phase("Mes 5-6", "P2: Documentación y CI/CD"),
            phase("Mes 7+", "P3: Optimizaciones y mejoras"),
        ];

        AuditData { scores, findings, debt, recommendations, metrics, roadmap }
    }

    /// Current metrics next to their industry standard
    pub fn benchmarks(&self) -> Vec<Benchmark> {
        let m = &self.metrics;
        vec![
            Benchmark::new("Uptime", m.uptime, UPTIME_TARGET),
            Benchmark::new("Cobertura Tests", m.test_coverage as f64, COVERAGE_STANDARD as f64),
            Benchmark::new("Tiempo Respuesta", m.avg_response_ms as f64, RESPONSE_BENCHMARK_MS as f64),
            Benchmark::new("MTTR", m.avg_resolution_hours, MTTR_STANDARD_HOURS),
        ]
    }

    /// Distinct finding areas in first-appearance order
    pub fn finding_areas(&self) -> Vec<&'static str> {
        let mut areas = Vec::new();
        for f in &self.findings {
            if !areas.contains(&f.area) {
                areas.push(f.area);
            }
        }
        areas
    }
}

pub fn dataset() -> &'static AuditData {
    static DATA: OnceLock<AuditData> = OnceLock::new();
    DATA.get_or_init(AuditData::demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_gaps() {
        let gaps: Vec<f64> = dataset().benchmarks().iter().map(|b| b.gap).collect();
        assert_eq!(gaps, vec![-5.7, -57.0, 350.0, 4.5]);
    }

    #[test]
    fn test_finding_areas_order() {
        assert_eq!(
            dataset().finding_areas(),
            vec!["Seguridad", "Infraestructura", "Documentación", "Monitoreo"]
        );
    }

    #[test]
    fn test_severity_labels() {
        for s in Severity::ALL {
            assert_eq!(Severity::from_label(s.as_str()), Some(s));
        }
        assert_eq!(Severity::from_label("Extremo"), None);
    }

    #[test]
    fn test_only_first_findings_have_detail() {
        let with_detail: Vec<&str> = dataset()
            .findings
            .iter()
            .filter(|f| f.detail.is_some())
            .map(|f| f.id)
            .collect();
        assert_eq!(with_detail, vec!["HAL-001", "HAL-002"]);
    }
}
