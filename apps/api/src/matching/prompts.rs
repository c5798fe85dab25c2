//! Prompt templates for market analysis. Placeholders use `{name}` and are filled with `str::replace`.

/// JSON skill list for an area when the corpus is too small.
pub const MARKET_SKILLS_PROMPT: &str = r#"SEN TÜRKİYE İŞ PAZARI UZMANISIN.
'{area}' alanı için Türkiye'de TİPİK OLARAK ARANAN becerileri analiz et.
SADECE JSON DÖNDÜR, başka açıklama yapma.

JSON FORMATI:
{
  "skills": [
    {"name": "Beceri Adı", "frequency": 85, "importance": "Yüksek/Orta/Düşük"},
    {"name": "Beceri Adı", "frequency": 75, "importance": "Yüksek"}
  ]
}

KURALLAR:
- En az 15, en fazla 25 beceri listele
- Frequency: Bu becerinin iş ilanlarında geçme yüzdesi (0-100 arası)
  - Yüksek talep: 70-100
  - Orta talep: 40-69
  - Düşük talep: 10-39
- Importance: Becerinin kritikliği
- Becerileri önem sırasına göre sırala (frequency yüksekten düşüğe)
- Sadece gerçekçi, Türkiye pazarında aranan beceriler ekle
- Mesleğe özel teknik becerileri dahil et

MESLEK/ALAN: {area}"#;

/// Markdown market report from general knowledge.
pub const GENERAL_MARKET_PROMPT: &str = r#"SEN TÜRKİYE İŞ PAZARI UZMANI VE KARİYER DANIŞMANISIN.
'{area}' alanı için Türkiye pazarındaki tipik iş ilanlarını ve beceri gereksinimlerini analiz et.

GÖREVİN:
1. Bu meslek/alan için Türkiye'de TİPİK OLARAK ARANAN 15-20 beceriyi listele
2. Bu becerilerin önem sırasına göre (en çok aranan en üstte) düzenle
3. Adayın mevcut profilini bu becerilerle karşılaştır
4. Eksik becerileri belirle ve öncelikli gelişim önerileri sun
5. Kariyer yol haritası öner

ÖNEMLİ:
- Sadece Türkiye pazarına özgü gerçekçi beceriler listele
- Her meslek için o alana özel teknik becerileri dahil et (örn: Makine Mühendisliği için SolidWorks, AutoCAD)
- Genel becerileri de dahil et (İngilizce, Proje Yönetimi vb.)
- Somut, ölçülebilir ve iş dünyasında gerçekten aranan beceriler olsun

ÇIKTI FORMATI (TÜRKÇE, Markdown formatında):

## 📊 {area} İçin Pazar Analizi

### 🔥 En Çok Aranan Yetkinlikler (Önem Sırasına Göre)
1. [Beceri 1] - [Kısa açıklama neden önemli]
...

### ✅ Profilinizle Eşleşen Beceriler
- [Beceri]: Bu beceriye sahipsiniz ✓

### ⚠️ Eksik Olan Kritik Becerileriniz
- [Beceri]: [Neden önemli ve nasıl öğrenilebilir]

### 🎯 Gelişim Yol Haritanız
**İLK 3 AY:** [En kritik 3 beceri]
**3-6 AY:** [Orta vadeli hedefler]
**6-12 AY:** [Uzun vadeli uzmanlaşma alanları]

### 💡 Ek Öneriler
[Kariyer gelişimi için ek stratejik tavsiyeler]

---

[ADAY PROFİLİ]
{profile}"#;

/// Markdown market report grounded in stored postings.
pub const CORPUS_MARKET_PROMPT: &str = r#"SEN ÜST DÜZEY BİR TEKNOLOJİ PAZAR ANALİSTİSİN.
Aşağıda veritabanındaki iş ilanları ve bir adayın profili var.

GÖREVİN:
1. '{area}' alanıyla ilgili TÜM iş ilanlarını BUL (sadece başlık değil, içerikteki becerilere göre)
2. Bu ilanlardaki BECERİ TRENDLERİNİ analiz et
3. Adayın mevcut becerileriyle KARŞILAŞTIR
4. Kişiselleştirilmiş GELİŞİM YOL HARİTASI oluştur

[TÜM İLAN VERİLERİ]
{postings}

[ADAY PROFİLİ]
{profile}"#;
